//! Moral graph: drop edge directions and marry every pair of co-parents.

use std::collections::{BTreeMap, BTreeSet};

use crate::dag::DagModel;

/// Undirected graph with sorted adjacency, so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoralGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl MoralGraph {
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn neighbors(&self, node: &str) -> Option<&BTreeSet<String>> {
        self.adjacency.get(node)
    }

    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Consume into the adjacency map.
    pub fn into_adjacency(self) -> BTreeMap<String, BTreeSet<String>> {
        self.adjacency
    }

    fn link(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }
}

/// Moralize `dag`. Every node appears, including isolated ones.
pub fn moralize(dag: &DagModel) -> MoralGraph {
    let mut moral = MoralGraph::default();
    for node in dag.nodes() {
        moral.adjacency.entry(node.clone()).or_default();
        let parents = dag.parents(&node);
        for (i, parent) in parents.iter().enumerate() {
            moral.link(parent, &node);
            for other in &parents[i + 1..] {
                moral.link(parent, other);
            }
        }
    }
    moral
}
