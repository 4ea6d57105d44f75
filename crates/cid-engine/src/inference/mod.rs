//! Exact inference over a diagram's distributions.

mod elimination_order;
mod variable_elimination;

pub use elimination_order::min_neighbors_order;
pub use variable_elimination::VariableElimination;

use cid_core::{CidResult, Context};
use cid_cpd::Factor;

use crate::model::CausalInfluenceDiagram;

/// Computes joint factors over query variables.
///
/// `query` returns the joint of `targets` with the evidence, **unnormalized**: its total
/// is the probability of the evidence. Implementations must not mutate the model.
pub trait IInferenceEngine: Send + Sync {
    fn query(
        &self,
        model: &CausalInfluenceDiagram,
        targets: &[String],
        evidence: &Context,
    ) -> CidResult<Factor>;
}
