//! Cycle detection before every edge insertion.

use std::collections::{HashMap, VecDeque};

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use super::dag::DagModel;

/// If `target` already reaches `source`, render the cycle `source -> target -> ... -> source`.
pub fn cycle_path(dag: &DagModel, source: NodeIndex, target: NodeIndex) -> Option<String> {
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(target);
    previous.insert(target, target);

    while let Some(current) = queue.pop_front() {
        if current == source {
            let mut path = vec![source];
            let mut cursor = source;
            while cursor != target {
                cursor = previous[&cursor];
                path.push(cursor);
            }
            // `path` runs source <- ... <- target; the new edge closes it.
            path.reverse();
            let mut names: Vec<&str> = vec![dag.name_of(source)];
            names.extend(path.iter().map(|&n| dag.name_of(n)));
            return Some(names.join(" -> "));
        }
        for next in dag.graph.neighbors_directed(current, Direction::Outgoing) {
            if !previous.contains_key(&next) {
                previous.insert(next, current);
                queue.push_back(next);
            }
        }
    }
    None
}

