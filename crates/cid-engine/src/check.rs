use std::collections::BTreeSet;

use cid_core::errors::{CidError, CidResult, DistributionError};
use cid_cpd::Distribution;

use crate::model::CausalInfluenceDiagram;

impl CausalInfluenceDiagram {
    /// Check that the model is complete and consistent.
    ///
    /// Every node needs a distribution. Tabular tables must condition on exactly the
    /// node's parents and have columns summing to one within `validity_tolerance`.
    /// Placeholder and functional distributions are rejected unless `allow_placeholder`.
    pub fn check_model(&self, allow_placeholder: bool) -> CidResult<()> {
        for node in self.graph.nodes() {
            let dist = self.attached(&node)?;
            let table = match dist {
                Distribution::Tabular(table) => table,
                Distribution::Continuous(_) => continue,
                Distribution::Placeholder(_) | Distribution::Functional(_) => {
                    if allow_placeholder {
                        continue;
                    }
                    return Err(CidError::UncommittedPolicy {
                        node,
                        kind: dist.kind().to_string(),
                    });
                }
            };

            let parents = self.graph.parents(&node);
            let declared: BTreeSet<&String> = table.evidence().iter().collect();
            if declared != parents.iter().collect::<BTreeSet<_>>() {
                return Err(CidError::ParentMismatch {
                    node,
                    expected: parents,
                    actual: table.evidence().to_vec(),
                });
            }
            if !table.is_valid(self.config.validity_tolerance) {
                return Err(DistributionError::InvalidTable {
                    variable: node,
                    reason: format!("column sums {:?} are not 1", table.column_sums()),
                }
                .into());
            }
        }
        Ok(())
    }
}
