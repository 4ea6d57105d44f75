use std::fmt;
use std::sync::Arc;

/// Density `f(x | parents)` supplied by an external model.
pub type DensityFn = Arc<dyn Fn(f64, &[f64]) -> f64 + Send + Sync>;

/// Opaque continuous distribution. Attached and carried like any other distribution,
/// but discrete inference refuses it.
#[derive(Clone)]
pub struct ContinuousCpd {
    variable: String,
    evidence: Vec<String>,
    density: DensityFn,
}

impl fmt::Debug for ContinuousCpd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousCpd")
            .field("variable", &self.variable)
            .field("evidence", &self.evidence)
            .finish_non_exhaustive()
    }
}

impl ContinuousCpd {
    pub fn new<F>(variable: impl Into<String>, evidence: Vec<String>, density: F) -> Self
    where
        F: Fn(f64, &[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            variable: variable.into(),
            evidence,
            density: Arc::new(density),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn density(&self, x: f64, parent_values: &[f64]) -> f64 {
        (self.density)(x, parent_values)
    }
}
