//! Exact inference by variable elimination.

use std::collections::{BTreeSet, HashSet};

use cid_core::errors::{CidError, CidResult, InferenceError};
use cid_core::Context;
use cid_cpd::{Distribution, Factor};
use cid_graph::traversal;

use super::elimination_order::min_neighbors_order;
use super::IInferenceEngine;
use crate::model::CausalInfluenceDiagram;

/// The default inference engine.
///
/// Only ancestors of the targets and evidence contribute to the answer, so everything else
/// is pruned before any factor is built. Evidence enters as indicator factors, which keeps
/// the result unnormalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableElimination;

impl VariableElimination {
    pub fn new() -> Self {
        Self
    }

    /// The factor for `node`, checked against the graph.
    fn node_factor(&self, model: &CausalInfluenceDiagram, node: &str) -> CidResult<Factor> {
        let dist = model.attached(node)?;
        if let Distribution::Continuous(_) = dist {
            return Err(InferenceError::UnsupportedDistribution {
                variable: node.to_string(),
                kind: dist.kind().to_string(),
            }
            .into());
        }
        let table = dist.to_tabular()?;

        let parents = model.parents(node);
        let declared_parents: BTreeSet<&str> = table.evidence().iter().map(String::as_str).collect();
        let graph_parents: BTreeSet<&str> = parents.iter().map(String::as_str).collect();
        if declared_parents != graph_parents {
            return Err(CidError::ParentMismatch {
                node: node.to_string(),
                expected: parents,
                actual: table.evidence().to_vec(),
            });
        }
        for (parent, &declared) in table.evidence().iter().zip(table.evidence_card()) {
            let actual = model.cardinality(parent)?;
            if actual != declared {
                return Err(InferenceError::CardinalityMismatch {
                    variable: node.to_string(),
                    parent: parent.clone(),
                    declared,
                    actual,
                }
                .into());
            }
        }
        Ok(table.to_factor())
    }
}

impl IInferenceEngine for VariableElimination {
    fn query(
        &self,
        model: &CausalInfluenceDiagram,
        targets: &[String],
        evidence: &Context,
    ) -> CidResult<Factor> {
        let graph = model.graph();
        for variable in targets.iter().map(String::as_str).chain(evidence.variables()) {
            if !graph.contains(variable) {
                return Err(InferenceError::UnknownVariable {
                    variable: variable.to_string(),
                }
                .into());
            }
        }

        let mut wanted: Vec<String> = Vec::with_capacity(targets.len());
        for target in targets {
            if !wanted.contains(target) {
                wanted.push(target.clone());
            }
        }

        let relevant: HashSet<String> = traversal::ancestors_of_all(
            graph,
            wanted.iter().map(String::as_str).chain(evidence.variables()),
        );

        let mut factors = Vec::with_capacity(relevant.len() + evidence.len());
        for node in graph.topological_order() {
            if relevant.contains(&node) {
                factors.push(self.node_factor(model, &node)?);
            }
        }
        for (variable, index) in evidence.iter() {
            let cardinality = model.cardinality(variable)?;
            if index >= cardinality {
                return Err(InferenceError::EvidenceOutOfRange {
                    variable: variable.to_string(),
                    index,
                    cardinality,
                }
                .into());
            }
            factors.push(Factor::indicator(variable, cardinality, index));
        }

        let eliminate: BTreeSet<String> = relevant
            .iter()
            .filter(|n| !wanted.contains(n))
            .cloned()
            .collect();
        let moral = graph.subgraph(&relevant).moralize();

        for variable in min_neighbors_order(&moral, &eliminate) {
            let (touching, rest): (Vec<Factor>, Vec<Factor>) =
                factors.into_iter().partition(|f| f.contains(&variable));
            factors = rest;
            if touching.is_empty() {
                continue;
            }
            let product = touching
                .iter()
                .fold(Factor::scalar(1.0), |acc, f| acc.product(f));
            factors.push(product.marginalize(&variable));
        }

        let joint = factors
            .iter()
            .fold(Factor::scalar(1.0), |acc, f| acc.product(f));
        joint.permute(&wanted).ok_or_else(|| {
            InferenceError::UnknownVariable {
                variable: wanted.join(","),
            }
            .into()
        })
    }
}
