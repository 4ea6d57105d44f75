//! Attaching distributions and materializing placeholder/functional ones.

use cid_core::errors::{CidResult, DistributionError};
use cid_core::SolverEvent;
use cid_cpd::Distribution;

use crate::model::CausalInfluenceDiagram;
use crate::observability::events;

impl CausalInfluenceDiagram {
    /// Attach distributions, replacing any existing one per node (last write wins).
    ///
    /// The whole batch is scope-checked before anything is attached. Afterwards every
    /// placeholder and functional distribution is rematerialized in topological order;
    /// those whose parents are not yet known stay pending. On error the model is unchanged.
    pub fn add_distributions<I>(&mut self, distributions: I) -> CidResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Distribution>,
    {
        let replaced = self.attach(distributions.into_iter().map(Into::into).collect())?;
        for variable in replaced {
            self.emit(SolverEvent::DistributionReplaced { variable });
        }
        Ok(())
    }

    /// Swap in a distribution the model itself derived (policy imputation). Silent.
    pub(crate) fn install(&mut self, distribution: Distribution) -> CidResult<()> {
        self.attach(vec![distribution]).map(|_| ())
    }

    fn attach(&mut self, distributions: Vec<Distribution>) -> CidResult<Vec<String>> {
        for dist in &distributions {
            let missing: Vec<String> = dist
                .scope()
                .into_iter()
                .filter(|v| !self.graph.contains(v))
                .collect();
            if !missing.is_empty() {
                return Err(DistributionError::Scope {
                    variable: dist.variable().to_string(),
                    missing,
                }
                .into());
            }
        }

        let previous = self.distributions.clone();
        let mut replaced = Vec::new();
        for dist in distributions {
            let variable = dist.variable().to_string();
            events::distribution_attached(&variable, dist.kind().as_str());
            if self.distributions.insert(variable.clone(), dist).is_some() {
                replaced.push(variable);
            }
        }

        if let Err(err) = self.materialize_pending() {
            self.distributions = previous;
            return Err(err);
        }
        Ok(replaced)
    }

    /// Materialize every placeholder and functional distribution, parents first.
    pub(crate) fn materialize_pending(&mut self) -> CidResult<()> {
        for node in self.graph.topological_order() {
            let pending = self
                .distributions
                .get(&node)
                .is_some_and(Distribution::is_materializable);
            if !pending {
                continue;
            }
            let Some(mut dist) = self.distributions.remove(&node) else {
                continue;
            };
            let result = dist.materialize(&*self);
            self.distributions.insert(node.clone(), dist);
            if !result? {
                events::materialization_deferred(&node);
            }
        }
        Ok(())
    }
}
