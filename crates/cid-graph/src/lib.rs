//! # cid-graph
//!
//! Directed acyclic graph primitives used by the influence diagram engine.
//! Wraps a `petgraph` stable graph keyed by node name and provides DAG enforcement,
//! deterministic topological order, ancestor queries, d-separation, and moralization.

pub mod dag;
pub mod dag_enforcement;
pub mod d_separation;
pub mod moral;
pub mod traversal;

pub use dag::DagModel;
pub use moral::MoralGraph;
