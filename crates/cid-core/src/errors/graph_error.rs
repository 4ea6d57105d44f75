/// Structural graph errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("cycle detected in graph: {path}")]
    CycleDetected { path: String },

    #[error("unknown node: {node}")]
    UnknownNode { node: String },
}
