//! Active trails (d-connection) via the reachable-set ("Bayes ball") algorithm.
//!
//! A trail is blocked by the observed set `Z` at a chain or fork whose middle node is in
//! `Z`, and at a collider unless the collider or one of its descendants is in `Z`.

use std::collections::{HashSet, VecDeque};

use cid_core::errors::CidResult;
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use crate::dag::DagModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Heading {
    /// Arrived from a child, travelling against edge direction.
    Up,
    /// Arrived from a parent, travelling along edge direction.
    Down,
}

/// All nodes connected to `start` by an active trail given `observed`.
/// `start` itself is included unless observed.
pub fn active_trail_nodes<S: AsRef<str>>(
    dag: &DagModel,
    start: &str,
    observed: &[S],
) -> CidResult<HashSet<String>> {
    let start_idx = dag.require(start)?;
    let observed: HashSet<NodeIndex> = observed
        .iter()
        .map(|n| dag.require(n.as_ref()))
        .collect::<CidResult<_>>()?;

    // Phase 1: observed nodes and their ancestors. A collider is open iff it is in here.
    let mut observed_ancestors: HashSet<NodeIndex> = HashSet::new();
    let mut frontier: Vec<NodeIndex> = observed.iter().copied().collect();
    while let Some(node) = frontier.pop() {
        if observed_ancestors.insert(node) {
            frontier.extend(dag.graph.neighbors_directed(node, Direction::Incoming));
        }
    }

    // Phase 2: traverse (node, heading) pairs.
    let mut visited: HashSet<(NodeIndex, Heading)> = HashSet::new();
    let mut reachable: HashSet<NodeIndex> = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back((start_idx, Heading::Up));

    while let Some((node, heading)) = queue.pop_front() {
        if !visited.insert((node, heading)) {
            continue;
        }
        let is_observed = observed.contains(&node);
        if !is_observed {
            reachable.insert(node);
        }

        match heading {
            Heading::Up if !is_observed => {
                for parent in dag.graph.neighbors_directed(node, Direction::Incoming) {
                    queue.push_back((parent, Heading::Up));
                }
                for child in dag.graph.neighbors_directed(node, Direction::Outgoing) {
                    queue.push_back((child, Heading::Down));
                }
            }
            Heading::Up => {}
            Heading::Down => {
                if !is_observed {
                    for child in dag.graph.neighbors_directed(node, Direction::Outgoing) {
                        queue.push_back((child, Heading::Down));
                    }
                }
                if observed_ancestors.contains(&node) {
                    for parent in dag.graph.neighbors_directed(node, Direction::Incoming) {
                        queue.push_back((parent, Heading::Up));
                    }
                }
            }
        }
    }

    Ok(reachable
        .into_iter()
        .map(|idx| dag.name_of(idx).to_string())
        .collect())
}

/// Whether an active trail connects `start` and `end` given `observed`.
pub fn is_active_trail<S: AsRef<str>>(
    dag: &DagModel,
    start: &str,
    end: &str,
    observed: &[S],
) -> CidResult<bool> {
    dag.require(end)?;
    Ok(active_trail_nodes(dag, start, observed)?.contains(end))
}

/// Whether `a` and `b` are d-separated given `observed`.
pub fn is_d_separated<S: AsRef<str>>(
    dag: &DagModel,
    a: &str,
    b: &str,
    observed: &[S],
) -> CidResult<bool> {
    Ok(!is_active_trail(dag, a, b, observed)?)
}
