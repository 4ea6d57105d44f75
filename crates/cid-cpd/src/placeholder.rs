//! Undetermined policy: a decision's state space without a committed rule.

use cid_core::errors::DistributionError;
use serde::{Deserialize, Serialize};

use crate::tabular::TabularCpd;
use crate::view::IModelView;

/// Records cardinality and state values; materializes to a uniform table over whatever
/// parents the node has in the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlaceholderCpd")]
pub struct PlaceholderCpd {
    variable: String,
    states: Vec<f64>,
    table: Option<TabularCpd>,
}

#[derive(Deserialize)]
struct RawPlaceholderCpd {
    variable: String,
    states: Vec<f64>,
    #[serde(default)]
    table: Option<TabularCpd>,
}

impl TryFrom<RawPlaceholderCpd> for PlaceholderCpd {
    type Error = DistributionError;

    fn try_from(raw: RawPlaceholderCpd) -> Result<Self, Self::Error> {
        let mut cpd = Self::with_states(raw.variable, raw.states)?;
        if let Some(table) = raw.table {
            if table.variable() != cpd.variable || table.states() != cpd.states.as_slice() {
                return Err(DistributionError::InvalidTable {
                    variable: cpd.variable,
                    reason: "materialized table does not match the placeholder".into(),
                });
            }
            cpd.table = Some(table);
        }
        Ok(cpd)
    }
}

impl PlaceholderCpd {
    /// Placeholder with states `0..cardinality`.
    pub fn new(variable: impl Into<String>, cardinality: usize) -> Result<Self, DistributionError> {
        Self::with_states(variable, (0..cardinality).map(|i| i as f64).collect())
    }

    /// Placeholder with explicit numeric state values.
    pub fn with_states(
        variable: impl Into<String>,
        states: Vec<f64>,
    ) -> Result<Self, DistributionError> {
        let variable = variable.into();
        if states.is_empty() {
            return Err(DistributionError::InvalidTable {
                variable,
                reason: "a placeholder needs at least one state".into(),
            });
        }
        Ok(Self {
            variable,
            states,
            table: None,
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn cardinality(&self) -> usize {
        self.states.len()
    }

    pub fn states(&self) -> &[f64] {
        &self.states
    }

    /// The uniform table, once materialized.
    pub fn table(&self) -> Option<&TabularCpd> {
        self.table.as_ref()
    }

    /// Rebuild the uniform table from the model's current parents.
    /// Returns `Ok(false)` and clears the table while a parent's cardinality is unknown.
    pub fn materialize(&mut self, view: &dyn IModelView) -> Result<bool, DistributionError> {
        let parents = view.parents(&self.variable);
        let mut parent_cards = Vec::with_capacity(parents.len());
        for parent in &parents {
            match view.cardinality(parent) {
                Some(card) => parent_cards.push(card),
                None => {
                    self.table = None;
                    return Ok(false);
                }
            }
        }
        self.table = Some(TabularCpd::uniform(
            self.variable.clone(),
            self.cardinality(),
            parents,
            parent_cards,
            self.states.clone(),
        )?);
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
