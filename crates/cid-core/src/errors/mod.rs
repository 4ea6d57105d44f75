//! Error taxonomy for the workspace.
//!
//! Structural errors (cycles, scope violations) and inference failures are fatal and
//! propagate to the caller. Degenerate optimization and distribution overwrites are
//! reported as [`crate::SolverEvent`]s instead.

mod distribution_error;
mod graph_error;
mod inference_error;

pub use distribution_error::DistributionError;
pub use graph_error::GraphError;
pub use inference_error::InferenceError;

/// Top-level error for every fallible operation on a diagram.
#[derive(Debug, thiserror::Error)]
pub enum CidError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error("node {node} cannot be both a decision and a utility node")]
    RoleConflict { node: String },

    #[error("node {node} is not a decision node")]
    NotADecision { node: String },

    #[error("no distribution attached for node {node}")]
    MissingDistribution { node: String },

    #[error("cardinality of node {node} is not known yet")]
    UnknownCardinality { node: String },

    #[error("node {node} holds an uncommitted {kind} distribution")]
    UncommittedPolicy { node: String, kind: String },

    #[error("distribution for {node} conditions on {actual:?} but graph parents are {expected:?}")]
    ParentMismatch {
        node: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("config error: {reason}")]
    Config { reason: String },

    #[error("model definition error: {reason}")]
    Definition { reason: String },
}

/// Convenience alias used across the workspace.
pub type CidResult<T> = Result<T, CidError>;
