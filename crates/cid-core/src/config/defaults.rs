//! Default values for solver configuration.

/// Actions whose expected utility is within this distance of the best are tied.
pub const DEFAULT_TIE_TOLERANCE: f64 = 1e-9;

/// Allowed deviation of a table column sum from 1.0 in `check_model`.
pub const DEFAULT_VALIDITY_TOLERANCE: f64 = 0.01;

/// Contexts are evaluated sequentially unless explicitly enabled.
pub const DEFAULT_PARALLEL_CONTEXTS: bool = false;
