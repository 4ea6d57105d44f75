mod context;
mod events;
mod node_kind;

pub use context::Context;
pub use events::SolverEvent;
pub use node_kind::NodeKind;
