//! # cid-engine
//!
//! Causal influence diagrams and their solver.
//!
//! A [`CausalInfluenceDiagram`] is a DAG whose nodes are chance, decision, or utility
//! variables, plus one distribution per node. The engine attaches and materializes
//! distributions, answers expectation queries through an injectable
//! [`IInferenceEngine`], checks sufficient recall, and computes subgame-perfect policies
//! by backward induction over the decisions.

mod attach;
mod check;
pub mod definition;
pub mod inference;
pub mod model;
pub mod observability;
mod policy;
mod query;
mod recall;
pub mod solver;

pub use definition::{DistributionDefinition, ModelDefinition};
pub use inference::{IInferenceEngine, VariableElimination};
pub use model::CausalInfluenceDiagram;
pub use observability::{RecordingObserver, TracingObserver};
pub use solver::enumerate_contexts;
