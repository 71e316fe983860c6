//! Sequential breadth-first oracle for connectivity properties.
//!
//! Computes the canonical partition of an edge list directly over the
//! external id space, with no interning and no union-find, so disagreements
//! with the engine cannot share a root cause with the code under test.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::NodeId;
use crate::result::ComponentsResult;

/// Maps every node to the smallest node id in its component.
///
/// Scanning start nodes in ascending order guarantees that the first
/// unvisited node of a component is its minimum, so the BFS label is
/// canonical by construction.
pub(super) fn bfs_partition(edges: &[(NodeId, NodeId)]) -> FxHashMap<NodeId, NodeId> {
    let mut adjacency: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
    for &(from, to) in edges {
        adjacency.entry(from).or_default().push(to);
        adjacency.entry(to).or_default().push(from);
    }

    let mut nodes: Vec<NodeId> = adjacency.keys().copied().collect();
    nodes.sort_unstable();

    let mut representative = FxHashMap::default();
    for &start in &nodes {
        if representative.contains_key(&start) {
            continue;
        }
        representative.insert(start, start);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            let Some(neighbours) = adjacency.get(&node) else {
                continue;
            };
            for &next in neighbours {
                if !representative.contains_key(&next) {
                    representative.insert(next, start);
                    queue.push_back(next);
                }
            }
        }
    }
    representative
}

/// Reduces an engine result to the same canonical form as
/// [`bfs_partition`]: node → smallest node id sharing its label.
pub(super) fn result_partition(result: &ComponentsResult) -> FxHashMap<NodeId, NodeId> {
    let mut minima: FxHashMap<u64, NodeId> = FxHashMap::default();
    for (node, label) in result.iter() {
        minima
            .entry(label)
            .and_modify(|current| *current = (*current).min(node))
            .or_insert(node);
    }
    result
        .iter()
        .map(|(node, label)| (node, minima[&label]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::bfs_partition;

    #[test]
    fn oracle_three_components() {
        let partition = bfs_partition(&[(1, 2), (2, 3), (5, 6), (8, 9), (9, 10)]);
        assert_eq!(partition[&1], 1);
        assert_eq!(partition[&2], 1);
        assert_eq!(partition[&3], 1);
        assert_eq!(partition[&5], 5);
        assert_eq!(partition[&6], 5);
        assert_eq!(partition[&8], 8);
        assert_eq!(partition[&10], 8);
    }

    #[test]
    fn oracle_self_loop_is_a_singleton() {
        let partition = bfs_partition(&[(4, 4)]);
        assert_eq!(partition.len(), 1);
        assert_eq!(partition[&4], 4);
    }

    #[test]
    fn oracle_empty_input() {
        assert!(bfs_partition(&[]).is_empty());
    }
}
