/// Errors raised while building, attaching, or converting conditional distributions.
#[derive(Debug, thiserror::Error)]
pub enum DistributionError {
    #[error("distribution for {variable} references nodes not in the model: {missing:?}")]
    Scope {
        variable: String,
        missing: Vec<String>,
    },

    #[error("invalid table for {variable}: {reason}")]
    InvalidTable { variable: String, reason: String },

    #[error("value {value} produced for {variable} is not one of its declared states")]
    ValueOutOfDomain { variable: String, value: f64 },

    #[error("distribution for {variable} has not been materialized")]
    NotMaterialized { variable: String },

    #[error("{kind} distribution for {variable} cannot be converted to a table")]
    Unsupported { variable: String, kind: String },
}
