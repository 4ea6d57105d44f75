//! [`CausalInfluenceDiagram`]: a DAG with decision and utility roles plus attached distributions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use cid_core::errors::{CidError, CidResult, GraphError};
use cid_core::{NodeKind, SolverConfig, SolverEvent, ISolverObserver};
use cid_cpd::{Distribution, IModelView, TabularCpd};
use cid_graph::traversal;
use cid_graph::DagModel;

use crate::inference::{IInferenceEngine, VariableElimination};
use crate::observability::TracingObserver;

/// A causal influence diagram.
///
/// Cloning deep-copies the graph and distributions. The observer, inference engine and
/// the functions inside functional distributions are shared.
#[derive(Clone)]
pub struct CausalInfluenceDiagram {
    pub(crate) graph: DagModel,
    pub(crate) decision_nodes: Vec<String>,
    pub(crate) utility_nodes: Vec<String>,
    pub(crate) distributions: BTreeMap<String, Distribution>,
    pub(crate) config: SolverConfig,
    pub(crate) observer: Arc<dyn ISolverObserver>,
    pub(crate) engine: Arc<dyn IInferenceEngine>,
}

impl fmt::Debug for CausalInfluenceDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CausalInfluenceDiagram")
            .field("nodes", &self.graph.nodes())
            .field("edges", &self.graph.edges())
            .field("decision_nodes", &self.decision_nodes)
            .field("utility_nodes", &self.utility_nodes)
            .field("distributions", &self.distributions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CausalInfluenceDiagram {
    /// Build a diagram from an edge list and the two role sets.
    ///
    /// Role nodes that no edge mentions are added as isolated nodes. Fails on a cycle or
    /// when a node is both a decision and a utility.
    pub fn new<E, D, U>(edges: &[(E, E)], decision_nodes: &[D], utility_nodes: &[U]) -> CidResult<Self>
    where
        E: AsRef<str>,
        D: AsRef<str>,
        U: AsRef<str>,
    {
        let decision_nodes = dedup(decision_nodes);
        let utility_nodes = dedup(utility_nodes);
        if let Some(node) = decision_nodes.iter().find(|d| utility_nodes.contains(d)) {
            return Err(CidError::RoleConflict { node: node.clone() });
        }

        let mut graph = DagModel::from_edges(edges)?;
        for node in decision_nodes.iter().chain(&utility_nodes) {
            graph.ensure_node(node);
        }

        Ok(Self {
            graph,
            decision_nodes,
            utility_nodes,
            distributions: BTreeMap::new(),
            config: SolverConfig::default(),
            observer: Arc::new(TracingObserver),
            engine: Arc::new(VariableElimination::new()),
        })
    }

    /// Replace the solver configuration after validating it.
    pub fn with_config(mut self, config: SolverConfig) -> CidResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn with_observer(mut self, observer: Arc<dyn ISolverObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_inference_engine(mut self, engine: Arc<dyn IInferenceEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn graph(&self) -> &DagModel {
        &self.graph
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> Vec<String> {
        self.graph.nodes()
    }

    pub fn parents(&self, node: &str) -> Vec<String> {
        self.graph.parents(node)
    }

    pub fn decision_nodes(&self) -> &[String] {
        &self.decision_nodes
    }

    pub fn utility_nodes(&self) -> &[String] {
        &self.utility_nodes
    }

    pub fn is_decision(&self, node: &str) -> bool {
        self.decision_nodes.iter().any(|d| d == node)
    }

    pub fn is_utility(&self, node: &str) -> bool {
        self.utility_nodes.iter().any(|u| u == node)
    }

    /// Role of `node`. Nodes that are neither decisions nor utilities are chance nodes.
    pub fn node_kind(&self, node: &str) -> CidResult<NodeKind> {
        self.graph.require(node)?;
        Ok(if self.is_decision(node) {
            NodeKind::Decision
        } else if self.is_utility(node) {
            NodeKind::Utility
        } else {
            NodeKind::Chance
        })
    }

    pub fn distribution(&self, node: &str) -> Option<&Distribution> {
        self.distributions.get(node)
    }

    pub fn distributions(&self) -> &BTreeMap<String, Distribution> {
        &self.distributions
    }

    /// Number of states of `node`.
    pub fn cardinality(&self, node: &str) -> CidResult<usize> {
        self.attached(node)?
            .cardinality()
            .ok_or_else(|| CidError::UnknownCardinality {
                node: node.to_string(),
            })
    }

    /// Numeric value of each state of `node`.
    pub fn states(&self, node: &str) -> CidResult<Vec<f64>> {
        self.attached(node)?
            .states()
            .ok_or_else(|| CidError::UnknownCardinality {
                node: node.to_string(),
            })
    }

    /// Decisions in topological order, ties broken by insertion order.
    pub fn decision_order(&self) -> Vec<String> {
        traversal::restrict_order(&self.graph, &self.decision_nodes)
    }

    /// Committed decision rules: every decision that currently holds a tabular distribution.
    pub fn policy(&self) -> BTreeMap<String, TabularCpd> {
        self.decision_nodes
            .iter()
            .filter_map(|d| match self.distributions.get(d) {
                Some(Distribution::Tabular(cpd)) => Some((d.clone(), cpd.clone())),
                _ => None,
            })
            .collect()
    }

    /// Every decision holds a tabular distribution.
    pub fn is_solved(&self) -> bool {
        self.decision_nodes
            .iter()
            .all(|d| matches!(self.distributions.get(d), Some(Distribution::Tabular(_))))
    }

    pub(crate) fn attached(&self, node: &str) -> CidResult<&Distribution> {
        self.graph.require(node)?;
        self.distributions
            .get(node)
            .ok_or_else(|| CidError::MissingDistribution {
                node: node.to_string(),
            })
    }

    pub(crate) fn require_decision(&self, node: &str) -> CidResult<()> {
        if !self.graph.contains(node) {
            return Err(GraphError::UnknownNode {
                node: node.to_string(),
            }
            .into());
        }
        if !self.is_decision(node) {
            return Err(CidError::NotADecision {
                node: node.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn emit(&self, event: SolverEvent) {
        self.observer.on_event(&event);
    }
}

impl IModelView for CausalInfluenceDiagram {
    fn parents(&self, node: &str) -> Vec<String> {
        self.graph.parents(node)
    }

    fn cardinality(&self, node: &str) -> Option<usize> {
        self.distributions.get(node).and_then(Distribution::cardinality)
    }

    fn states(&self, node: &str) -> Option<Vec<f64>> {
        self.distributions.get(node).and_then(Distribution::states)
    }
}

fn dedup<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}
