//! Expectations over inference results.

use cid_core::errors::{CidResult, InferenceError};
use cid_core::Context;
use cid_cpd::Factor;

use crate::model::CausalInfluenceDiagram;

impl CausalInfluenceDiagram {
    /// Joint factor over `targets` with `context` as evidence, unnormalized.
    pub fn query<S: AsRef<str>>(&self, targets: &[S], context: &Context) -> CidResult<Factor> {
        let targets: Vec<String> = targets.iter().map(|t| t.as_ref().to_string()).collect();
        self.engine.query(self, &targets, context)
    }

    /// Expected total utility given `context`.
    pub fn expected_utility(&self, context: &Context) -> CidResult<f64> {
        let utilities = self.utility_nodes.clone();
        self.expectation(&utilities, context)?
            .ok_or_else(|| zero_probability(context))
    }

    /// Expected numeric value of `variable` given `context`.
    pub fn expected_value(&self, variable: &str, context: &Context) -> CidResult<f64> {
        self.expectation(&[variable.to_string()], context)?
            .ok_or_else(|| zero_probability(context))
    }

    /// `E[Σ targets | context]`, or `None` when the context has probability zero.
    /// An empty target set has expectation zero.
    pub(crate) fn expectation(&self, targets: &[String], context: &Context) -> CidResult<Option<f64>> {
        if targets.is_empty() {
            return Ok(Some(0.0));
        }
        let mut factor = self.query(targets, context)?;
        if !factor.normalize() {
            return Ok(None);
        }

        let states = factor
            .variables()
            .iter()
            .map(|v| self.states(v))
            .collect::<CidResult<Vec<_>>>()?;
        let expectation = factor
            .iter()
            .map(|(assignment, p)| {
                let total: f64 = assignment
                    .iter()
                    .zip(&states)
                    .map(|(&i, values)| values.get(i).copied().unwrap_or(0.0))
                    .sum();
                total * p
            })
            .sum();
        Ok(Some(expectation))
    }
}

fn zero_probability(context: &Context) -> cid_core::CidError {
    InferenceError::ZeroProbabilityEvidence {
        context: context.to_string(),
    }
    .into()
}
