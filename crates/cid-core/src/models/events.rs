use serde::{Deserialize, Serialize};

use super::Context;

/// Non-fatal conditions surfaced to the observer while building or solving a diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SolverEvent {
    /// A distribution was attached for a node that already had one. Last write wins.
    DistributionReplaced { variable: String },
    /// `decision` cannot recall `earlier_decision`, which influences `utility`.
    InsufficientRecall {
        decision: String,
        earlier_decision: String,
        utility: String,
    },
    /// No action had a defined expected utility under `context`, so all were deemed optimal.
    AllActionsOptimal { decision: String, context: Context },
}

impl SolverEvent {
    /// Stable snake_case name, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DistributionReplaced { .. } => "distribution_replaced",
            Self::InsufficientRecall { .. } => "insufficient_recall",
            Self::AllActionsOptimal { .. } => "all_actions_optimal",
        }
    }
}
