//! Ordering and reachability: topological order, ancestors, descendants.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use crate::dag::DagModel;

/// Kahn's algorithm. Among ready nodes the earliest inserted goes first, so the order
/// is a pure function of the graph's construction sequence.
pub fn topological_order(dag: &DagModel) -> Vec<String> {
    let mut in_degree: HashMap<NodeIndex, usize> = dag
        .graph
        .node_indices()
        .map(|idx| {
            let degree = dag
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .count();
            (idx, degree)
        })
        .collect();

    let mut ready: BinaryHeap<Reverse<NodeIndex>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(&idx, _)| Reverse(idx))
        .collect();

    let mut order = Vec::with_capacity(dag.node_count());
    while let Some(Reverse(current)) = ready.pop() {
        order.push(dag.name_of(current).to_string());
        for next in dag.graph.neighbors_directed(current, Direction::Outgoing) {
            if let Some(degree) = in_degree.get_mut(&next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(next));
                }
            }
        }
    }
    order
}

/// Topological order restricted to `nodes`.
pub fn restrict_order<S: AsRef<str>>(dag: &DagModel, nodes: &[S]) -> Vec<String> {
    let wanted: HashSet<&str> = nodes.iter().map(|n| n.as_ref()).collect();
    topological_order(dag)
        .into_iter()
        .filter(|n| wanted.contains(n.as_str()))
        .collect()
}

/// Every node with a directed path into `name`, including `name` itself.
pub fn ancestors_of(dag: &DagModel, name: &str) -> HashSet<String> {
    reach(dag, [name], Direction::Incoming)
}

/// Every node reachable from `name`, including `name` itself.
pub fn descendants_of(dag: &DagModel, name: &str) -> HashSet<String> {
    reach(dag, [name], Direction::Outgoing)
}

/// Union of the ancestor sets of `names`.
pub fn ancestors_of_all<'a, I>(dag: &DagModel, names: I) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    reach(dag, names, Direction::Incoming)
}

fn reach<'a, I>(dag: &DagModel, starts: I, direction: Direction) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    for name in starts {
        if let Some(idx) = dag.get_node(name) {
            if visited.insert(idx) {
                queue.push_back(idx);
            }
        }
    }

    while let Some(current) = queue.pop_front() {
        for neighbor in dag.graph.neighbors_directed(current, direction) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited
        .into_iter()
        .map(|idx| dag.name_of(idx).to_string())
        .collect()
}
