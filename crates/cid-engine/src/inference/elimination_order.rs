use std::collections::{BTreeMap, BTreeSet};

use cid_graph::MoralGraph;

/// Greedy min-neighbors elimination order for `eliminate` over `moral`.
///
/// Each step removes the variable with the fewest remaining neighbors (ties by name) and
/// connects its neighbors, mirroring the fill-in a factor product over it produces.
pub fn min_neighbors_order(moral: &MoralGraph, eliminate: &BTreeSet<String>) -> Vec<String> {
    let mut adjacency: BTreeMap<String, BTreeSet<String>> = moral.clone().into_adjacency();
    let mut remaining = eliminate.clone();
    let mut order = Vec::with_capacity(remaining.len());

    loop {
        let Some(next) = remaining
            .iter()
            .min_by_key(|v| adjacency.get(*v).map_or(0, BTreeSet::len))
            .cloned()
        else {
            break;
        };
        remaining.remove(&next);
        let neighbors = adjacency.remove(&next).unwrap_or_default();
        for a in &neighbors {
            if let Some(adj) = adjacency.get_mut(a) {
                adj.remove(&next);
                adj.extend(neighbors.iter().filter(|b| *b != a).cloned());
            }
        }
        order.push(next);
    }
    order
}
