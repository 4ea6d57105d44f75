//! petgraph::StableGraph wrapper with name-indexed nodes and DAG enforcement on insert.

use std::collections::{HashMap, HashSet};

use cid_core::errors::{CidResult, GraphError};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};

use crate::{d_separation, dag_enforcement, moral, traversal};

/// The underlying directed graph type. Node weights are node names.
pub type DagStableGraph = StableGraph<String, (), Directed>;

/// A directed acyclic graph with O(1) lookup by node name.
///
/// Nodes are never removed, so node indices follow insertion order. Every ordering this
/// type returns (parents, children, topological order) breaks ties by that order.
#[derive(Debug, Clone, Default)]
pub struct DagModel {
    pub(crate) graph: DagStableGraph,
    pub(crate) node_index: HashMap<String, NodeIndex>,
}

impl DagModel {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Build a graph from an edge list. Fails on the first edge that closes a cycle.
    pub fn from_edges<S: AsRef<str>>(edges: &[(S, S)]) -> CidResult<Self> {
        let mut dag = Self::new();
        for (source, target) in edges {
            dag.add_edge(source.as_ref(), target.as_ref())?;
        }
        Ok(dag)
    }

    /// Get or create the node with this name.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Add `source -> target`, creating missing endpoints. Duplicate edges are ignored.
    pub fn add_edge(&mut self, source: &str, target: &str) -> CidResult<()> {
        if source == target {
            return Err(GraphError::CycleDetected {
                path: format!("{source} -> {target}"),
            }
            .into());
        }
        let src = self.ensure_node(source);
        let tgt = self.ensure_node(target);
        if self.graph.find_edge(src, tgt).is_some() {
            return Ok(());
        }
        if let Some(path) = dag_enforcement::cycle_path(self, src, tgt) {
            return Err(GraphError::CycleDetected { path }.into());
        }
        self.graph.add_edge(src, tgt, ());
        Ok(())
    }

    /// Look up a node index by name.
    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    /// Look up a node index, failing with `UnknownNode`.
    pub fn require(&self, name: &str) -> CidResult<NodeIndex> {
        self.get_node(name).ok_or_else(|| {
            GraphError::UnknownNode {
                node: name.to_string(),
            }
            .into()
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Name of the node at `idx`. Empty for an index from another graph.
    pub fn name_of(&self, idx: NodeIndex) -> &str {
        self.graph.node_weight(idx).map(String::as_str).unwrap_or("")
    }

    /// All node names in insertion order.
    pub fn nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.name_of(idx).to_string())
            .collect()
    }

    /// All edges, ordered by source then target insertion order.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(NodeIndex, NodeIndex)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .collect();
        pairs.sort();
        pairs
            .into_iter()
            .map(|(s, t)| (self.name_of(s).to_string(), self.name_of(t).to_string()))
            .collect()
    }

    /// Direct predecessors in insertion order. Empty for unknown nodes.
    pub fn parents(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Direct successors in insertion order. Empty for unknown nodes.
    pub fn children(&self, name: &str) -> Vec<String> {
        self.neighbors(name, Direction::Outgoing)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(idx) = self.get_node(name) else {
            return Vec::new();
        };
        let mut found: Vec<NodeIndex> = self.graph.neighbors_directed(idx, direction).collect();
        found.sort();
        found.dedup();
        found
            .into_iter()
            .map(|n| self.name_of(n).to_string())
            .collect()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Induced sub-DAG on `keep`, preserving insertion order.
    pub fn subgraph(&self, keep: &HashSet<String>) -> DagModel {
        let mut sub = DagModel::new();
        for name in self.nodes() {
            if keep.contains(&name) {
                sub.ensure_node(&name);
            }
        }
        for (source, target) in self.edges() {
            if keep.contains(&source) && keep.contains(&target) {
                let src = sub.ensure_node(&source);
                let tgt = sub.ensure_node(&target);
                sub.graph.add_edge(src, tgt, ());
            }
        }
        sub
    }

    /// See [`traversal::topological_order`].
    pub fn topological_order(&self) -> Vec<String> {
        traversal::topological_order(self)
    }

    /// See [`traversal::ancestors_of`].
    pub fn ancestors_of(&self, name: &str) -> HashSet<String> {
        traversal::ancestors_of(self, name)
    }

    /// See [`traversal::descendants_of`].
    pub fn descendants_of(&self, name: &str) -> HashSet<String> {
        traversal::descendants_of(self, name)
    }

    /// See [`d_separation::is_active_trail`].
    pub fn is_active_trail<S: AsRef<str>>(
        &self,
        start: &str,
        end: &str,
        observed: &[S],
    ) -> CidResult<bool> {
        d_separation::is_active_trail(self, start, end, observed)
    }

    /// See [`moral::moralize`].
    pub fn moralize(&self) -> moral::MoralGraph {
        moral::moralize(self)
    }
}
