//! Sufficient recall.

use cid_core::constants::POLICY_MARKER_NODE;
use cid_core::errors::CidResult;
use cid_core::SolverEvent;

use crate::model::CausalInfluenceDiagram;

impl CausalInfluenceDiagram {
    /// Whether every decision can recall every earlier decision that shares a downstream
    /// utility with it.
    ///
    /// For each pair `d1` before `d2` and each utility `u` downstream of `d2`, a marker
    /// node is attached to `d1` on a throwaway copy of the graph. Recall fails if the
    /// marker is d-connected to `u` given `d2` and its parents. The first failure is
    /// reported as [`SolverEvent::InsufficientRecall`].
    pub fn check_sufficient_recall(&self) -> CidResult<bool> {
        let order = self.decision_order();
        let _span = tracing::info_span!("cid.recall", decisions = order.len()).entered();

        let marker = self.marker_name();
        for (i, d1) in order.iter().enumerate() {
            let mut with_marker = self.graph.clone();
            with_marker.add_edge(&marker, d1)?;

            for d2 in &order[i + 1..] {
                let mut observed = self.graph.parents(d2);
                observed.push(d2.clone());

                for utility in &self.utility_nodes {
                    if !self.graph.ancestors_of(utility).contains(d2) {
                        continue;
                    }
                    if with_marker.is_active_trail(&marker, utility, &observed)? {
                        self.emit(SolverEvent::InsufficientRecall {
                            decision: d2.clone(),
                            earlier_decision: d1.clone(),
                            utility: utility.clone(),
                        });
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }

    /// A node name not already in the graph.
    fn marker_name(&self) -> String {
        let mut name = POLICY_MARKER_NODE.to_string();
        while self.graph.contains(&name) {
            name.push('_');
        }
        name
    }
}
