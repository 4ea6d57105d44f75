//! Discrete factors: non-negative tables over a set of variables.
//!
//! Values are stored row-major with the last variable varying fastest, the same layout
//! [`crate::TabularCpd`] uses with the child variable first.

use cid_core::errors::DistributionError;

/// A table of values over the joint states of `variables`.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    variables: Vec<String>,
    cardinality: Vec<usize>,
    values: Vec<f64>,
}

impl Factor {
    /// Create a factor, checking that `values` covers every joint state exactly once.
    pub fn new(
        variables: Vec<String>,
        cardinality: Vec<usize>,
        values: Vec<f64>,
    ) -> Result<Self, DistributionError> {
        let invalid = |reason: String| DistributionError::InvalidTable {
            variable: variables.join(","),
            reason,
        };
        if variables.len() != cardinality.len() {
            return Err(invalid(format!(
                "{} variables but {} cardinalities",
                variables.len(),
                cardinality.len()
            )));
        }
        for (i, name) in variables.iter().enumerate() {
            if variables[..i].contains(name) {
                return Err(invalid(format!("variable {name} appears twice")));
            }
        }
        if cardinality.contains(&0) {
            return Err(invalid("cardinality must be positive".into()));
        }
        let expected: usize = cardinality.iter().product();
        if values.len() != expected {
            return Err(invalid(format!(
                "expected {expected} values, got {}",
                values.len()
            )));
        }
        Ok(Self::from_raw(variables, cardinality, values))
    }

    /// Caller guarantees the shape invariants.
    pub(crate) fn from_raw(variables: Vec<String>, cardinality: Vec<usize>, values: Vec<f64>) -> Self {
        Self {
            variables,
            cardinality,
            values,
        }
    }

    /// A factor over no variables holding a single value.
    pub fn scalar(value: f64) -> Self {
        Self::from_raw(Vec::new(), Vec::new(), vec![value])
    }

    /// 1.0 at `index`, 0.0 elsewhere. Conditioning on an observation is a product with this.
    pub fn indicator(variable: &str, cardinality: usize, index: usize) -> Self {
        let values = (0..cardinality)
            .map(|i| if i == index { 1.0 } else { 0.0 })
            .collect();
        Self::from_raw(vec![variable.to_string()], vec![cardinality], values)
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn cardinality(&self) -> &[usize] {
        &self.cardinality
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.variables.iter().any(|v| v == variable)
    }

    /// Number of joint states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all entries.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Scale to sum to one. Returns `false` (and leaves values untouched) when the total
    /// is zero or not finite.
    pub fn normalize(&mut self) -> bool {
        let total = self.total();
        if !(total.is_finite() && total > 0.0) {
            return false;
        }
        for v in &mut self.values {
            *v /= total;
        }
        true
    }

    /// State index of every variable at flat position `flat`.
    pub fn assignment(&self, flat: usize) -> Vec<usize> {
        decompose(flat, &self.cardinality)
    }

    /// Iterate `(assignment, value)` over every joint state.
    pub fn iter(&self) -> impl Iterator<Item = (Vec<usize>, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(flat, &v)| (self.assignment(flat), v))
    }

    /// Pointwise product over the union of both scopes.
    pub fn product(&self, other: &Factor) -> Factor {
        let mut variables = self.variables.clone();
        let mut cardinality = self.cardinality.clone();
        for (name, &card) in other.variables.iter().zip(&other.cardinality) {
            if !variables.contains(name) {
                variables.push(name.clone());
                cardinality.push(card);
            }
        }

        let positions = |f: &Factor| -> Vec<usize> {
            f.variables
                .iter()
                .map(|v| variables.iter().position(|u| u == v).unwrap_or(0))
                .collect()
        };
        let self_pos = positions(self);
        let other_pos = positions(other);
        let self_strides = strides(&self.cardinality);
        let other_strides = strides(&other.cardinality);

        let size: usize = cardinality.iter().product();
        let mut values = Vec::with_capacity(size);
        for flat in 0..size {
            let joint = decompose(flat, &cardinality);
            let si: usize = self_pos
                .iter()
                .zip(&self_strides)
                .map(|(&p, &s)| joint[p] * s)
                .sum();
            let oi: usize = other_pos
                .iter()
                .zip(&other_strides)
                .map(|(&p, &s)| joint[p] * s)
                .sum();
            values.push(self.values[si] * other.values[oi]);
        }
        Factor::from_raw(variables, cardinality, values)
    }

    /// Sum out `variable`. A variable outside the scope leaves the factor unchanged.
    pub fn marginalize(&self, variable: &str) -> Factor {
        let Some(pos) = self.variables.iter().position(|v| v == variable) else {
            return self.clone();
        };
        let mut variables = self.variables.clone();
        let mut cardinality = self.cardinality.clone();
        variables.remove(pos);
        cardinality.remove(pos);

        let kept_strides = strides(&cardinality);
        let mut values = vec![0.0; cardinality.iter().product()];
        for (flat, &v) in self.values.iter().enumerate() {
            let mut joint = decompose(flat, &self.cardinality);
            joint.remove(pos);
            let target: usize = joint.iter().zip(&kept_strides).map(|(a, s)| a * s).sum();
            values[target] += v;
        }
        Factor::from_raw(variables, cardinality, values)
    }

    /// Reorder the scope to `order`. `None` unless `order` is a permutation of the scope.
    pub fn permute<S: AsRef<str>>(&self, order: &[S]) -> Option<Factor> {
        if order.len() != self.variables.len() {
            return None;
        }
        let source_pos: Vec<usize> = order
            .iter()
            .map(|name| self.variables.iter().position(|v| v == name.as_ref()))
            .collect::<Option<_>>()?;
        let cardinality: Vec<usize> = source_pos.iter().map(|&p| self.cardinality[p]).collect();
        let source_strides = strides(&self.cardinality);

        let mut values = Vec::with_capacity(self.values.len());
        for flat in 0..self.values.len() {
            let joint = decompose(flat, &cardinality);
            let si: usize = joint
                .iter()
                .zip(&source_pos)
                .map(|(&a, &p)| a * source_strides[p])
                .sum();
            values.push(self.values[si]);
        }
        let variables = order.iter().map(|s| s.as_ref().to_string()).collect();
        Some(Factor::from_raw(variables, cardinality, values))
    }
}

/// Row-major strides, last position fastest.
pub(crate) fn strides(cardinality: &[usize]) -> Vec<usize> {
    let mut out = vec![1; cardinality.len()];
    for i in (0..cardinality.len().saturating_sub(1)).rev() {
        out[i] = out[i + 1] * cardinality[i + 1];
    }
    out
}

/// Inverse of the stride encoding.
pub(crate) fn decompose(mut flat: usize, cardinality: &[usize]) -> Vec<usize> {
    let mut out = vec![0; cardinality.len()];
    for i in (0..cardinality.len()).rev() {
        out[i] = flat % cardinality[i];
        flat /= cardinality[i];
    }
    out
}
