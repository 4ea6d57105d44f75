//! Declarative model definitions, loadable from JSON.

use cid_core::errors::{CidError, CidResult};
use cid_core::SolverConfig;
use cid_cpd::{Distribution, PlaceholderCpd, TabularCpd};
use serde::{Deserialize, Serialize};

use crate::model::CausalInfluenceDiagram;

/// A diagram as data: graph, roles, distributions, optional solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub decision_nodes: Vec<String>,
    #[serde(default)]
    pub utility_nodes: Vec<String>,
    #[serde(default)]
    pub distributions: Vec<DistributionDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverConfig>,
}

/// One distribution in a [`ModelDefinition`]. Functional and continuous distributions
/// carry code and cannot be expressed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionDefinition {
    /// One row of `values` per state of `variable`.
    Tabular {
        variable: String,
        values: Vec<Vec<f64>>,
        #[serde(default)]
        evidence: Vec<String>,
        #[serde(default)]
        evidence_card: Vec<usize>,
        #[serde(default)]
        states: Option<Vec<f64>>,
    },
    /// Either `states` or `cardinality` must be given.
    Placeholder {
        variable: String,
        #[serde(default)]
        cardinality: Option<usize>,
        #[serde(default)]
        states: Option<Vec<f64>>,
    },
}

impl DistributionDefinition {
    pub fn variable(&self) -> &str {
        match self {
            Self::Tabular { variable, .. } | Self::Placeholder { variable, .. } => variable,
        }
    }

    pub fn to_distribution(&self) -> CidResult<Distribution> {
        match self {
            Self::Tabular {
                variable,
                values,
                evidence,
                evidence_card,
                states,
            } => {
                let mut cpd = TabularCpd::new(
                    variable.clone(),
                    values.len(),
                    values.clone(),
                    evidence.clone(),
                    evidence_card.clone(),
                )?;
                if let Some(states) = states {
                    cpd = cpd.with_states(states.clone())?;
                }
                Ok(cpd.into())
            }
            Self::Placeholder {
                variable,
                cardinality,
                states,
            } => {
                let cpd = match (states, cardinality) {
                    (Some(states), _) => PlaceholderCpd::with_states(variable.clone(), states.clone())?,
                    (None, Some(card)) => PlaceholderCpd::new(variable.clone(), *card)?,
                    (None, None) => {
                        return Err(CidError::Definition {
                            reason: format!("placeholder for {variable} needs states or a cardinality"),
                        })
                    }
                };
                Ok(cpd.into())
            }
        }
    }
}

impl ModelDefinition {
    pub fn from_json_str(source: &str) -> CidResult<Self> {
        serde_json::from_str(source).map_err(|e| CidError::Definition {
            reason: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> CidResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CidError::Definition {
            reason: e.to_string(),
        })
    }

    /// Build the diagram and attach every distribution in one batch.
    pub fn build(&self) -> CidResult<CausalInfluenceDiagram> {
        let mut cid =
            CausalInfluenceDiagram::new(&self.edges, &self.decision_nodes, &self.utility_nodes)?;
        if let Some(solver) = &self.solver {
            cid = cid.with_config(solver.clone())?;
        }
        let distributions = self
            .distributions
            .iter()
            .map(DistributionDefinition::to_distribution)
            .collect::<CidResult<Vec<_>>>()?;
        cid.add_distributions(distributions)?;
        Ok(cid)
    }
}
