//! Explicit conditional probability tables.

use cid_core::errors::DistributionError;
use serde::{Deserialize, Serialize};

use crate::factor::{decompose, strides, Factor};

/// `P(variable | evidence)` as a `[variable_card × Π evidence_card]` table.
///
/// Rows are states of the variable; columns enumerate evidence states with the last
/// evidence variable varying fastest. Each state of the variable carries a numeric value
/// (`states`, default `0, 1, ..`) that expectations are computed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTabularCpd")]
pub struct TabularCpd {
    variable: String,
    variable_card: usize,
    evidence: Vec<String>,
    evidence_card: Vec<usize>,
    values: Vec<f64>,
    states: Vec<f64>,
}

/// Wire form of [`TabularCpd`], checked before it becomes one.
#[derive(Deserialize)]
struct RawTabularCpd {
    variable: String,
    variable_card: usize,
    #[serde(default)]
    evidence: Vec<String>,
    #[serde(default)]
    evidence_card: Vec<usize>,
    values: Vec<f64>,
    #[serde(default)]
    states: Option<Vec<f64>>,
}

impl TryFrom<RawTabularCpd> for TabularCpd {
    type Error = DistributionError;

    fn try_from(raw: RawTabularCpd) -> Result<Self, Self::Error> {
        let cpd = Self::from_flat(
            raw.variable,
            raw.variable_card,
            raw.values,
            raw.evidence,
            raw.evidence_card,
        )?;
        match raw.states {
            Some(states) => cpd.with_states(states),
            None => Ok(cpd),
        }
    }
}

impl TabularCpd {
    /// Build from one row per state of the variable.
    pub fn new(
        variable: impl Into<String>,
        variable_card: usize,
        values: Vec<Vec<f64>>,
        evidence: Vec<String>,
        evidence_card: Vec<usize>,
    ) -> Result<Self, DistributionError> {
        let variable = variable.into();
        if values.len() != variable_card {
            return Err(DistributionError::InvalidTable {
                variable,
                reason: format!("expected {variable_card} rows, got {}", values.len()),
            });
        }
        let columns: usize = evidence_card.iter().product();
        if let Some(row) = values.iter().position(|r| r.len() != columns) {
            return Err(DistributionError::InvalidTable {
                variable,
                reason: format!(
                    "row {row} has {} columns, expected {columns}",
                    values[row].len()
                ),
            });
        }
        let flat = values.into_iter().flatten().collect();
        Self::from_flat(variable, variable_card, flat, evidence, evidence_card)
    }

    /// Build from a row-major flat table.
    pub fn from_flat(
        variable: impl Into<String>,
        variable_card: usize,
        values: Vec<f64>,
        evidence: Vec<String>,
        evidence_card: Vec<usize>,
    ) -> Result<Self, DistributionError> {
        let cpd = Self {
            variable: variable.into(),
            variable_card,
            evidence,
            evidence_card,
            values,
            states: (0..variable_card).map(|i| i as f64).collect(),
        };
        cpd.validate()?;
        Ok(cpd)
    }

    /// Uniform over the variable in every evidence column.
    pub fn uniform(
        variable: impl Into<String>,
        variable_card: usize,
        evidence: Vec<String>,
        evidence_card: Vec<usize>,
        states: Vec<f64>,
    ) -> Result<Self, DistributionError> {
        let columns: usize = evidence_card.iter().product();
        let p = 1.0 / variable_card.max(1) as f64;
        Self::from_flat(
            variable,
            variable_card,
            vec![p; variable_card * columns],
            evidence,
            evidence_card,
        )?
        .with_states(states)
    }

    /// One-hot table: in column `c` the state `choices[c]` has probability 1.
    pub fn deterministic(
        variable: impl Into<String>,
        variable_card: usize,
        evidence: Vec<String>,
        evidence_card: Vec<usize>,
        states: Vec<f64>,
        choices: &[usize],
    ) -> Result<Self, DistributionError> {
        let variable = variable.into();
        let columns: usize = evidence_card.iter().product();
        if choices.len() != columns {
            return Err(DistributionError::InvalidTable {
                variable,
                reason: format!("{} choices for {columns} columns", choices.len()),
            });
        }
        let mut values = vec![0.0; variable_card * columns];
        for (column, &choice) in choices.iter().enumerate() {
            if choice >= variable_card {
                return Err(DistributionError::InvalidTable {
                    variable,
                    reason: format!("choice {choice} out of range for cardinality {variable_card}"),
                });
            }
            values[choice * columns + column] = 1.0;
        }
        Self::from_flat(variable, variable_card, values, evidence, evidence_card)?.with_states(states)
    }

    /// Replace the numeric state values.
    pub fn with_states(mut self, states: Vec<f64>) -> Result<Self, DistributionError> {
        self.states = states;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), DistributionError> {
        let invalid = |reason: String| DistributionError::InvalidTable {
            variable: self.variable.clone(),
            reason,
        };
        if self.variable_card == 0 {
            return Err(invalid("variable cardinality must be positive".into()));
        }
        if self.evidence.len() != self.evidence_card.len() {
            return Err(invalid(format!(
                "{} evidence variables but {} evidence cardinalities",
                self.evidence.len(),
                self.evidence_card.len()
            )));
        }
        if self.evidence_card.contains(&0) {
            return Err(invalid("evidence cardinality must be positive".into()));
        }
        for (i, name) in self.evidence.iter().enumerate() {
            if name == &self.variable || self.evidence[..i].contains(name) {
                return Err(invalid(format!("evidence variable {name} repeated")));
            }
        }
        let expected = self.variable_card * self.columns();
        if self.values.len() != expected {
            return Err(invalid(format!(
                "expected {expected} values, got {}",
                self.values.len()
            )));
        }
        if self.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid("probabilities must be finite and non-negative".into()));
        }
        if self.states.len() != self.variable_card {
            return Err(invalid(format!(
                "{} state values for cardinality {}",
                self.states.len(),
                self.variable_card
            )));
        }
        if self.states.iter().any(|s| !s.is_finite()) {
            return Err(invalid("state values must be finite".into()));
        }
        Ok(())
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn variable_card(&self) -> usize {
        self.variable_card
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn evidence_card(&self) -> &[usize] {
        &self.evidence_card
    }

    pub fn states(&self) -> &[f64] {
        &self.states
    }

    /// Flat row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of evidence columns (1 without evidence).
    pub fn columns(&self) -> usize {
        self.evidence_card.iter().product()
    }

    /// The variable followed by its evidence.
    pub fn scope(&self) -> Vec<String> {
        std::iter::once(self.variable.clone())
            .chain(self.evidence.iter().cloned())
            .collect()
    }

    pub fn probability(&self, state: usize, column: usize) -> f64 {
        self.values
            .get(state * self.columns() + column)
            .copied()
            .unwrap_or(0.0)
    }

    /// Column for a full assignment of the evidence, in evidence order.
    pub fn column_index(&self, evidence_states: &[usize]) -> usize {
        evidence_states
            .iter()
            .zip(strides(&self.evidence_card))
            .map(|(a, s)| a * s)
            .sum()
    }

    /// Evidence assignment of `column`.
    pub fn column_assignment(&self, column: usize) -> Vec<usize> {
        decompose(column, &self.evidence_card)
    }

    /// The state with probability one in `column`, if the column is deterministic.
    pub fn deterministic_choice(&self, column: usize) -> Option<usize> {
        let column_values: Vec<f64> = (0..self.variable_card)
            .map(|s| self.probability(s, column))
            .collect();
        let chosen = column_values.iter().position(|&p| (p - 1.0).abs() < 1e-12)?;
        column_values
            .iter()
            .enumerate()
            .all(|(s, &p)| s == chosen || p.abs() < 1e-12)
            .then_some(chosen)
    }

    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.columns())
            .map(|c| (0..self.variable_card).map(|s| self.probability(s, c)).sum())
            .collect()
    }

    /// Every column sums to one within `tolerance`.
    pub fn is_valid(&self, tolerance: f64) -> bool {
        self.column_sums()
            .iter()
            .all(|sum| (sum - 1.0).abs() <= tolerance)
    }

    /// The table as a factor over `[variable, evidence..]`.
    pub fn to_factor(&self) -> Factor {
        let variables = self.scope();
        let cardinality = std::iter::once(self.variable_card)
            .chain(self.evidence_card.iter().copied())
            .collect();
        Factor::from_raw(variables, cardinality, self.values.clone())
    }
}
