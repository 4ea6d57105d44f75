use crate::models::SolverEvent;

/// Receives non-fatal solver events (overwrites, insufficient recall, degenerate contexts).
///
/// Injected into a diagram instead of logging from global state, so callers and tests
/// decide where these events go.
pub trait ISolverObserver: Send + Sync {
    fn on_event(&self, event: &SolverEvent);
}
