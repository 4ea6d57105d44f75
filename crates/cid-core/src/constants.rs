/// Base name of the synthetic node attached to an earlier decision during recall checks.
/// Suffixed with underscores until it does not collide with a model node.
pub const POLICY_MARKER_NODE: &str = "__policy__";

/// Absolute tolerance used when matching a functional output to a declared state value.
pub const STATE_MATCH_TOLERANCE: f64 = 1e-9;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "CID_LOG";
