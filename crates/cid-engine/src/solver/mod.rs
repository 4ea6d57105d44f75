//! Subgame-perfect policies by backward induction.
//!
//! Decisions are solved last to first. Each is solved on a copy of the model where the
//! decision itself is uniform and every later decision already follows its optimal rule.
//! The rule is committed before moving on to the next earlier decision.

mod contexts;

use std::collections::BTreeMap;

use cid_core::errors::CidResult;
use cid_core::{Context, SolverEvent};
use cid_cpd::TabularCpd;
use rayon::prelude::*;

pub use contexts::enumerate_contexts;

use crate::model::CausalInfluenceDiagram;
use crate::observability::events;

impl CausalInfluenceDiagram {
    /// Compute a subgame-perfect policy without touching this model.
    pub fn solve(&self) -> CidResult<BTreeMap<String, TabularCpd>> {
        let mut working = self.clone();
        working.commit_optimal_policy()?;
        Ok(working.policy())
    }

    /// Compute a subgame-perfect policy and commit it. On error the model is unchanged.
    pub fn impute_optimal_policy(&mut self) -> CidResult<()> {
        let mut working = self.clone();
        working.commit_optimal_policy()?;
        *self = working;
        Ok(())
    }

    fn commit_optimal_policy(&mut self) -> CidResult<()> {
        let order = self.decision_order();
        let _span = tracing::info_span!("cid.solve", decisions = order.len()).entered();
        for decision in order.iter().rev() {
            let rule = self.optimal_decision_rule(decision)?;
            self.install(rule.into())?;
        }
        Ok(())
    }

    /// Deterministic best response of `decision` in every parent context, given the rules
    /// currently attached to the other decisions.
    ///
    /// In each context the first action within `tie_tolerance` of the best wins.
    pub fn optimal_decision_rule(&self, decision: &str) -> CidResult<TabularCpd> {
        self.require_decision(decision)?;
        let _span = tracing::info_span!("cid.decision", decision = %decision).entered();

        let states = self.states(decision)?;
        let parents = self.parents(decision);
        let cards = parents
            .iter()
            .map(|p| self.cardinality(p))
            .collect::<CidResult<Vec<_>>>()?;
        let contexts = enumerate_contexts(&parents, &cards);

        let mut neutral = self.clone();
        neutral.impute_random_decision(decision)?;
        let cardinality = states.len();
        let first_best = |context: &Context| -> CidResult<Option<usize>> {
            let actions = neutral.best_actions(decision, cardinality, context)?;
            Ok(actions.map(|a| a.first().copied().unwrap_or(0)))
        };

        let best = if self.config.parallel_contexts {
            contexts
                .par_iter()
                .map(first_best)
                .collect::<CidResult<Vec<_>>>()?
        } else {
            contexts
                .iter()
                .map(first_best)
                .collect::<CidResult<Vec<_>>>()?
        };
        // Events go out after the ordered collect so observers see context order.
        let choices: Vec<usize> = best
            .into_iter()
            .zip(&contexts)
            .map(|(choice, context)| {
                choice.unwrap_or_else(|| {
                    self.all_actions_optimal(decision, context);
                    0
                })
            })
            .collect();
        events::decision_solved(decision, contexts.len());

        Ok(TabularCpd::deterministic(
            decision,
            cardinality,
            parents,
            cards,
            states,
            &choices,
        )?)
    }

    /// Every action of `decision` that is optimal under `context`, in index order.
    pub fn optimal_actions(&self, decision: &str, context: &Context) -> CidResult<Vec<usize>> {
        self.require_decision(decision)?;
        let cardinality = self.cardinality(decision)?;
        let mut neutral = self.clone();
        neutral.impute_random_decision(decision)?;
        match neutral.best_actions(decision, cardinality, context)? {
            Some(actions) => Ok(actions),
            None => {
                self.all_actions_optimal(decision, context);
                Ok((0..cardinality).collect())
            }
        }
    }

    fn all_actions_optimal(&self, decision: &str, context: &Context) {
        self.emit(SolverEvent::AllActionsOptimal {
            decision: decision.to_string(),
            context: context.clone(),
        });
    }

    /// Actions within `tie_tolerance` of the best, or `None` when no action has a defined
    /// value. Assumes `decision` is already neutralized on `self`.
    fn best_actions(
        &self,
        decision: &str,
        cardinality: usize,
        context: &Context,
    ) -> CidResult<Option<Vec<usize>>> {
        let mut values = Vec::with_capacity(cardinality);
        for action in 0..cardinality {
            let trial = context.clone().with(decision, action);
            values.push(self.expectation(&self.utility_nodes, &trial)?);
        }

        let best = values.iter().flatten().copied().reduce(f64::max);
        let Some(best) = best else {
            return Ok(None);
        };

        let tolerance = self.config.tie_tolerance;
        Ok(Some(
            values
                .iter()
                .enumerate()
                .filter(|(_, value)| value.is_some_and(|v| best - v <= tolerance))
                .map(|(action, _)| action)
                .collect(),
        ))
    }
}
