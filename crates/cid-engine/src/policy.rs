//! Policy imputation: random, conditional-expectation, and freezing.

use cid_core::errors::CidResult;
use cid_cpd::{Distribution, FunctionalCpd, PlaceholderCpd};

use crate::model::CausalInfluenceDiagram;
use crate::solver::enumerate_contexts;

impl CausalInfluenceDiagram {
    /// Reset `decision` to a uniform placeholder with the same states.
    pub fn impute_random_decision(&mut self, decision: &str) -> CidResult<()> {
        self.require_decision(decision)?;
        let states = self.states(decision)?;
        self.install(PlaceholderCpd::with_states(decision, states)?.into())
    }

    /// Reset every decision to a uniform placeholder. All or nothing.
    pub fn impute_random_policy(&mut self) -> CidResult<()> {
        let mut working = self.clone();
        for decision in self.decision_nodes.clone() {
            working.impute_random_decision(&decision)?;
        }
        *self = working;
        Ok(())
    }

    /// Make `decision` output `E[target | parents(decision)]`, then freeze it.
    ///
    /// Expectations are taken on a snapshot from before the change. The decision's states
    /// become the distinct expectation values.
    pub fn impute_conditional_expectation_decision(
        &mut self,
        decision: &str,
        target: &str,
    ) -> CidResult<()> {
        self.require_decision(decision)?;
        let snapshot = self.clone();
        let parents = snapshot.parents(decision);
        let cards = parents
            .iter()
            .map(|p| snapshot.cardinality(p))
            .collect::<CidResult<Vec<_>>>()?;

        let expectations = enumerate_contexts(&parents, &cards)
            .iter()
            .map(|context| snapshot.expected_value(target, context))
            .collect::<CidResult<Vec<f64>>>()?;

        let rule = FunctionalCpd::new(decision, parents, move |pv| {
            let column = pv
                .indices()
                .iter()
                .zip(&cards)
                .fold(0, |acc, (&i, &card)| acc * card + i);
            expectations.get(column).copied().unwrap_or(f64::NAN)
        });
        let mut working = self.clone();
        working.install(rule.into())?;
        working.freeze_policy(decision)?;
        *self = working;
        Ok(())
    }

    /// Replace `decision`'s distribution by its tabular form. A tabular one is left as is.
    pub fn freeze_policy(&mut self, decision: &str) -> CidResult<()> {
        self.require_decision(decision)?;
        let table = match self.attached(decision)? {
            Distribution::Tabular(_) => return Ok(()),
            other => other.to_tabular()?,
        };
        self.install(table.into())
    }
}
