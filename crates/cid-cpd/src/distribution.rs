use std::fmt;

use cid_core::errors::DistributionError;
use serde::{Deserialize, Serialize};

use crate::continuous::ContinuousCpd;
use crate::functional::FunctionalCpd;
use crate::placeholder::PlaceholderCpd;
use crate::tabular::TabularCpd;
use crate::view::IModelView;

/// Discriminant of [`Distribution`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    Tabular,
    Placeholder,
    Functional,
    Continuous,
}

impl DistributionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::Placeholder => "placeholder",
            Self::Functional => "functional",
            Self::Continuous => "continuous",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conditional distribution attached to one node.
#[derive(Debug, Clone)]
pub enum Distribution {
    Tabular(TabularCpd),
    Placeholder(PlaceholderCpd),
    Functional(FunctionalCpd),
    Continuous(ContinuousCpd),
}

impl Distribution {
    /// The node this distribution describes.
    pub fn variable(&self) -> &str {
        match self {
            Self::Tabular(cpd) => cpd.variable(),
            Self::Placeholder(cpd) => cpd.variable(),
            Self::Functional(cpd) => cpd.variable(),
            Self::Continuous(cpd) => cpd.variable(),
        }
    }

    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Tabular(_) => DistributionKind::Tabular,
            Self::Placeholder(_) => DistributionKind::Placeholder,
            Self::Functional(_) => DistributionKind::Functional,
            Self::Continuous(_) => DistributionKind::Continuous,
        }
    }

    /// Variables this distribution conditions on. A placeholder takes its parents from
    /// the graph, so its declared evidence is whatever its current table carries.
    pub fn evidence(&self) -> Vec<String> {
        match self {
            Self::Tabular(cpd) => cpd.evidence().to_vec(),
            Self::Placeholder(cpd) => cpd
                .table()
                .map(|t| t.evidence().to_vec())
                .unwrap_or_default(),
            Self::Functional(cpd) => cpd.evidence().to_vec(),
            Self::Continuous(cpd) => cpd.evidence().to_vec(),
        }
    }

    /// The variable followed by its evidence.
    pub fn scope(&self) -> Vec<String> {
        std::iter::once(self.variable().to_string())
            .chain(self.evidence())
            .collect()
    }

    /// Number of states, if known without further materialization.
    pub fn cardinality(&self) -> Option<usize> {
        match self {
            Self::Tabular(cpd) => Some(cpd.variable_card()),
            Self::Placeholder(cpd) => Some(cpd.cardinality()),
            Self::Functional(cpd) => cpd.cardinality(),
            Self::Continuous(_) => None,
        }
    }

    /// Numeric state values, if known.
    pub fn states(&self) -> Option<Vec<f64>> {
        match self {
            Self::Tabular(cpd) => Some(cpd.states().to_vec()),
            Self::Placeholder(cpd) => Some(cpd.states().to_vec()),
            Self::Functional(cpd) => cpd.states().map(<[f64]>::to_vec),
            Self::Continuous(_) => None,
        }
    }

    /// Placeholder and functional distributions compute their table from the model.
    pub fn is_materializable(&self) -> bool {
        matches!(self, Self::Placeholder(_) | Self::Functional(_))
    }

    /// Recompute the table from `view`. `Ok(false)` means parent information is still
    /// missing and the caller should retry once it is known.
    pub fn materialize(&mut self, view: &dyn IModelView) -> Result<bool, DistributionError> {
        match self {
            Self::Tabular(_) | Self::Continuous(_) => Ok(true),
            Self::Placeholder(cpd) => cpd.materialize(view),
            Self::Functional(cpd) => cpd.materialize(view),
        }
    }

    /// The explicit table, materialized if needed.
    pub fn to_tabular(&self) -> Result<TabularCpd, DistributionError> {
        match self {
            Self::Tabular(cpd) => Ok(cpd.clone()),
            Self::Placeholder(cpd) => cpd.to_tabular(),
            Self::Functional(cpd) => cpd.to_tabular(),
            Self::Continuous(cpd) => Err(DistributionError::Unsupported {
                variable: cpd.variable().to_string(),
                kind: DistributionKind::Continuous.to_string(),
            }),
        }
    }

    /// Borrow the current table without cloning.
    pub fn as_tabular(&self) -> Option<&TabularCpd> {
        match self {
            Self::Tabular(cpd) => Some(cpd),
            Self::Placeholder(cpd) => cpd.table(),
            Self::Functional(cpd) => cpd.table(),
            Self::Continuous(_) => None,
        }
    }

    pub fn is_tabular(&self) -> bool {
        matches!(self, Self::Tabular(_))
    }
}

impl From<TabularCpd> for Distribution {
    fn from(cpd: TabularCpd) -> Self {
        Self::Tabular(cpd)
    }
}

impl From<PlaceholderCpd> for Distribution {
    fn from(cpd: PlaceholderCpd) -> Self {
        Self::Placeholder(cpd)
    }
}

impl From<FunctionalCpd> for Distribution {
    fn from(cpd: FunctionalCpd) -> Self {
        Self::Functional(cpd)
    }
}

impl From<ContinuousCpd> for Distribution {
    fn from(cpd: ContinuousCpd) -> Self {
        Self::Continuous(cpd)
    }
}
