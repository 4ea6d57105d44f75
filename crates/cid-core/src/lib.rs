//! # cid-core
//!
//! Foundation crate for the causal influence diagram workspace.
//! Defines errors, solver config, contexts, solver events, observer traits, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{CidConfig, SolverConfig};
pub use errors::{CidError, CidResult};
pub use models::{Context, NodeKind, SolverEvent};
pub use traits::ISolverObserver;
