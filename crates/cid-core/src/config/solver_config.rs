use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{CidError, CidResult};

/// Policy solver configuration.
///
/// # Examples
///
/// ```
/// use cid_core::config::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert!(!config.parallel_contexts);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Expected utilities within this distance of the maximum count as optimal. Default: 1e-9.
    pub tie_tolerance: f64,
    /// Allowed deviation of a column sum from 1.0 when checking a model. Default: 0.01.
    pub validity_tolerance: f64,
    /// Evaluate parent contexts of a decision on the rayon pool. Default: false.
    pub parallel_contexts: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tie_tolerance: defaults::DEFAULT_TIE_TOLERANCE,
            validity_tolerance: defaults::DEFAULT_VALIDITY_TOLERANCE,
            parallel_contexts: defaults::DEFAULT_PARALLEL_CONTEXTS,
        }
    }
}

impl SolverConfig {
    /// Reject tolerances that would make optimization or validation meaningless.
    pub fn validate(&self) -> CidResult<()> {
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(CidError::Config {
                reason: format!("tie_tolerance must be finite and >= 0, got {}", self.tie_tolerance),
            });
        }
        if !self.validity_tolerance.is_finite() || self.validity_tolerance <= 0.0 {
            return Err(CidError::Config {
                reason: format!(
                    "validity_tolerance must be finite and > 0, got {}",
                    self.validity_tolerance
                ),
            });
        }
        Ok(())
    }
}
