/// Inference failures. Queries are deterministic, so none of these are retried.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("unknown variable in query: {variable}")]
    UnknownVariable { variable: String },

    #[error("{kind} distribution for {variable} is not supported by discrete inference")]
    UnsupportedDistribution { variable: String, kind: String },

    #[error("evidence {variable}={index} is out of range for cardinality {cardinality}")]
    EvidenceOutOfRange {
        variable: String,
        index: usize,
        cardinality: usize,
    },

    #[error("table for {variable} declares cardinality {declared} for parent {parent}, which has {actual}")]
    CardinalityMismatch {
        variable: String,
        parent: String,
        declared: usize,
        actual: usize,
    },

    #[error("context {context} has zero probability under the model")]
    ZeroProbabilityEvidence { context: String },
}
