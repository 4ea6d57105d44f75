//! Configuration, loadable from TOML. Every section falls back to its defaults.

pub mod defaults;
mod solver_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use solver_config::SolverConfig;

use crate::errors::{CidError, CidResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CidConfig {
    pub solver: SolverConfig,
}

impl CidConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(source: &str) -> CidResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| CidError::Config {
            reason: e.to_string(),
        })?;
        config.solver.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> CidResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| CidError::Config {
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_toml(&source)
    }
}
