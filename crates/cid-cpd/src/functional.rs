//! Decision rules given as a pure function of parent values.

use std::fmt;
use std::sync::Arc;

use cid_core::constants::STATE_MATCH_TOLERANCE;
use cid_core::errors::DistributionError;

use crate::factor::decompose;
use crate::tabular::TabularCpd;
use crate::view::IModelView;

/// Shared pure function from parent values to the chosen value of the variable.
pub type PolicyFn = Arc<dyn Fn(&ParentValues<'_>) -> f64 + Send + Sync>;

/// One joint assignment of a functional distribution's parents.
#[derive(Debug, Clone, Copy)]
pub struct ParentValues<'a> {
    names: &'a [String],
    indices: &'a [usize],
    values: &'a [f64],
}

impl<'a> ParentValues<'a> {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &'a [String] {
        self.names
    }

    /// State index of each parent.
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    /// Numeric state value of each parent.
    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Value of the parent called `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.position(name).map(|i| self.values[i])
    }

    /// State index of the parent called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.position(name).map(|i| self.indices[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// A deterministic distribution computed by a function of the parents' values.
///
/// The state space is either declared up front, in which case every output must match a
/// declared value, or derived as the sorted distinct outputs over all parent assignments.
#[derive(Clone)]
pub struct FunctionalCpd {
    variable: String,
    evidence: Vec<String>,
    function: PolicyFn,
    declared_states: Option<Vec<f64>>,
    table: Option<TabularCpd>,
}

impl fmt::Debug for FunctionalCpd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalCpd")
            .field("variable", &self.variable)
            .field("evidence", &self.evidence)
            .field("declared_states", &self.declared_states)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl FunctionalCpd {
    pub fn new<F>(variable: impl Into<String>, evidence: Vec<String>, function: F) -> Self
    where
        F: Fn(&ParentValues<'_>) -> f64 + Send + Sync + 'static,
    {
        Self {
            variable: variable.into(),
            evidence,
            function: Arc::new(function),
            declared_states: None,
            table: None,
        }
    }

    /// Fix the state space instead of deriving it from the outputs.
    pub fn with_states(mut self, states: Vec<f64>) -> Self {
        self.declared_states = Some(states);
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn table(&self) -> Option<&TabularCpd> {
        self.table.as_ref()
    }

    pub fn cardinality(&self) -> Option<usize> {
        self.states().map(<[f64]>::len)
    }

    pub fn states(&self) -> Option<&[f64]> {
        match &self.table {
            Some(table) => Some(table.states()),
            None => self.declared_states.as_deref(),
        }
    }

    /// Tabulate the function given each parent's state values, in evidence order.
    pub fn evaluate(&self, parent_states: &[Vec<f64>]) -> Result<TabularCpd, DistributionError> {
        if parent_states.len() != self.evidence.len() {
            return Err(DistributionError::InvalidTable {
                variable: self.variable.clone(),
                reason: format!(
                    "{} parent state lists for {} evidence variables",
                    parent_states.len(),
                    self.evidence.len()
                ),
            });
        }
        let cards: Vec<usize> = parent_states.iter().map(Vec::len).collect();
        let columns: usize = cards.iter().product();

        let mut outputs = Vec::with_capacity(columns);
        for column in 0..columns {
            let indices = decompose(column, &cards);
            let values: Vec<f64> = indices
                .iter()
                .zip(parent_states)
                .map(|(&i, states)| states[i])
                .collect();
            let out = (self.function)(&ParentValues {
                names: &self.evidence,
                indices: &indices,
                values: &values,
            });
            if !out.is_finite() {
                return Err(DistributionError::InvalidTable {
                    variable: self.variable.clone(),
                    reason: format!("function returned {out} for parent states {indices:?}"),
                });
            }
            outputs.push(out);
        }

        let domain = match &self.declared_states {
            Some(states) => states.clone(),
            None => {
                let mut distinct = outputs.clone();
                distinct.sort_by(f64::total_cmp);
                distinct.dedup();
                distinct
            }
        };

        let choices = outputs
            .iter()
            .map(|&out| {
                domain
                    .iter()
                    .position(|&s| (s - out).abs() <= STATE_MATCH_TOLERANCE)
                    .ok_or_else(|| DistributionError::ValueOutOfDomain {
                        variable: self.variable.clone(),
                        value: out,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        TabularCpd::deterministic(
            self.variable.clone(),
            domain.len(),
            self.evidence.clone(),
            cards,
            domain,
            &choices,
        )
    }

    /// Tabulate against the model's current parent states.
    /// Returns `Ok(false)` and clears the table while a parent's states are unknown.
    pub fn materialize(&mut self, view: &dyn IModelView) -> Result<bool, DistributionError> {
        let mut parent_states = Vec::with_capacity(self.evidence.len());
        for parent in &self.evidence {
            match view.states(parent) {
                Some(states) => parent_states.push(states),
                None => {
                    self.table = None;
                    return Ok(false);
                }
            }
        }
        self.table = Some(self.evaluate(&parent_states)?);
        Ok(true)
    }

    pub fn to_tabular(&self) -> Result<TabularCpd, DistributionError> {
        self.table
            .clone()
            .ok_or_else(|| DistributionError::NotMaterialized {
                variable: self.variable.clone(),
            })
    }
}
