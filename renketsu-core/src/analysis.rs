//! Peripheral graph analyses over the interned edge-list representation.
//!
//! Breadth-first shortest path lengths and degree statistics share the
//! component driver's validation and interning but none of its union-find
//! state. Both are batch helpers around the same undirected, unweighted
//! reading of the edge list.

use std::collections::VecDeque;

use crate::NodeId;
use crate::components::validate_rows;
use crate::error::Result;
use crate::interner::NodeInterner;

/// Unvisited marker in the per-query distance vector.
const UNVISITED: u64 = u64::MAX;

/// Computes the unweighted shortest path length for each query pair.
///
/// Entry `i` is `Some(hops)` for the shortest path between the endpoints of
/// `queries[i]`, or `None` when no path exists within `max_depth` (or at
/// all). A query with equal endpoints is `Some(0)` for any valid id;
/// endpoints never seen in `edges` reach nothing else.
///
/// # Errors
/// Returns [`GraphError::InvalidNodeId`] for zero ids in either slice.
///
/// # Examples
/// ```
/// use renketsu_core::shortest_path_lengths;
///
/// let edges = [(1, 2), (2, 3), (5, 6)];
/// let lengths = shortest_path_lengths(&edges, &[(1, 3), (1, 5), (7, 7)], None)?;
/// assert_eq!(lengths, [Some(2), None, Some(0)]);
/// # Ok::<(), renketsu_core::GraphError>(())
/// ```
///
/// [`GraphError::InvalidNodeId`]: crate::GraphError::InvalidNodeId
pub fn shortest_path_lengths(
    edges: &[(NodeId, NodeId)],
    queries: &[(NodeId, NodeId)],
    max_depth: Option<usize>,
) -> Result<Vec<Option<u64>>> {
    validate_rows(edges)?;
    validate_rows(queries)?;

    let (interner, adjacency) = build_adjacency(edges);
    let depth_cap = max_depth.map(|cap| cap as u64);

    let answers = queries
        .iter()
        .map(|&(source, target)| {
            if source == target {
                return Some(0);
            }
            let from = interner.lookup(source)?;
            let to = interner.lookup(target)?;
            bfs_distance(&adjacency, from, to, depth_cap)
        })
        .collect();
    Ok(answers)
}

/// Degree summary over the distinct nodes of an edge list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DegreeStats {
    min: u64,
    max: u64,
    mean: f64,
}

impl DegreeStats {
    /// Returns the smallest node degree.
    #[must_use]
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Returns the largest node degree.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Returns the mean node degree.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

/// Structural summary of an edge list.
///
/// # Examples
/// ```
/// use renketsu_core::graph_stats;
///
/// let stats = graph_stats(&[(1, 2), (2, 3)])?;
/// assert_eq!(stats.node_count(), 3);
/// assert_eq!(stats.edge_count(), 2);
/// assert_eq!(stats.degrees().max(), 2);
/// # Ok::<(), renketsu_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphStats {
    node_count: usize,
    edge_count: usize,
    density: f64,
    degrees: DegreeStats,
}

impl GraphStats {
    /// Returns the number of distinct nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of input edge rows, self-loops included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the edge count over the maximum possible simple-edge count
    /// for the distinct node set; 0 when fewer than two nodes exist.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns the degree summary. Self-loops contribute no degree.
    #[must_use]
    pub fn degrees(&self) -> DegreeStats {
        self.degrees
    }
}

/// Computes node, edge, density, and degree statistics for an edge list.
///
/// # Errors
/// Returns [`GraphError::InvalidNodeId`] for zero ids.
///
/// [`GraphError::InvalidNodeId`]: crate::GraphError::InvalidNodeId
pub fn graph_stats(edges: &[(NodeId, NodeId)]) -> Result<GraphStats> {
    validate_rows(edges)?;

    let mut interner = NodeInterner::<u64>::with_capacity(edges.len());
    let mut degrees: Vec<u64> = Vec::new();
    for &(from, to) in edges {
        let from = interner.intern(from);
        let to = interner.intern(to);
        if degrees.len() < interner.len() {
            degrees.resize(interner.len(), 0);
        }
        if from != to {
            degrees[from] += 1;
            degrees[to] += 1;
        }
    }

    let node_count = interner.len();
    let edge_count = edges.len();
    let possible_edges = node_count as f64 * (node_count as f64 - 1.0) / 2.0;
    let density = if possible_edges > 0.0 {
        edge_count as f64 / possible_edges
    } else {
        0.0
    };

    let min = degrees.iter().copied().min().unwrap_or(0);
    let max = degrees.iter().copied().max().unwrap_or(0);
    let mean = if node_count == 0 {
        0.0
    } else {
        degrees.iter().sum::<u64>() as f64 / node_count as f64
    };

    Ok(GraphStats {
        node_count,
        edge_count,
        density,
        degrees: DegreeStats { min, max, mean },
    })
}

/// Interns the edge list and builds an undirected adjacency list, dropping
/// self-loops.
fn build_adjacency(edges: &[(NodeId, NodeId)]) -> (NodeInterner<u64>, Vec<Vec<usize>>) {
    let mut interner = NodeInterner::<u64>::with_capacity(edges.len());
    let mut ends = Vec::with_capacity(edges.len());
    for &(from, to) in edges {
        let from = interner.intern(from);
        let to = interner.intern(to);
        if from != to {
            ends.push((from, to));
        }
    }
    let mut adjacency = vec![Vec::new(); interner.len()];
    for &(from, to) in &ends {
        adjacency[from].push(to);
        adjacency[to].push(from);
    }
    (interner, adjacency)
}

/// Breadth-first distance from `from` to `to`, abandoning paths longer than
/// `depth_cap` when one is set.
fn bfs_distance(adjacency: &[Vec<usize>], from: usize, to: usize, depth_cap: Option<u64>) -> Option<u64> {
    let mut distance = vec![UNVISITED; adjacency.len()];
    distance[from] = 0;
    let mut queue = VecDeque::from([from]);

    while let Some(node) = queue.pop_front() {
        let next_distance = distance[node] + 1;
        if let Some(cap) = depth_cap
            && next_distance > cap
        {
            // BFS visits nodes in non-decreasing distance order, so every
            // remaining path is at least this long.
            return None;
        }
        for &neighbour in &adjacency[node] {
            if distance[neighbour] != UNVISITED {
                continue;
            }
            if neighbour == to {
                return Some(next_distance);
            }
            distance[neighbour] = next_distance;
            queue.push_back(neighbour);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{graph_stats, shortest_path_lengths};
    use crate::error::GraphError;

    const CHAIN: [(u64, u64); 4] = [(1, 2), (2, 3), (3, 4), (5, 6)];

    #[rstest]
    fn path_lengths_follow_the_chain() {
        let lengths =
            shortest_path_lengths(&CHAIN, &[(1, 4), (1, 2), (4, 1)], None).expect("must succeed");
        assert_eq!(lengths, [Some(3), Some(1), Some(3)]);
    }

    #[rstest]
    fn unreachable_and_unknown_endpoints_have_no_path() {
        let lengths =
            shortest_path_lengths(&CHAIN, &[(1, 5), (1, 999), (999, 998)], None)
                .expect("must succeed");
        assert_eq!(lengths, [None, None, None]);
    }

    #[rstest]
    fn equal_endpoints_are_distance_zero_even_when_unknown() {
        let lengths =
            shortest_path_lengths(&CHAIN, &[(3, 3), (999, 999)], None).expect("must succeed");
        assert_eq!(lengths, [Some(0), Some(0)]);
    }

    #[rstest]
    #[case::under_cap(3, Some(3))]
    #[case::at_cap_boundary(2, None)]
    fn depth_cap_bounds_the_search(#[case] cap: usize, #[case] expected: Option<u64>) {
        let lengths =
            shortest_path_lengths(&CHAIN, &[(1, 4)], Some(cap)).expect("must succeed");
        assert_eq!(lengths, [expected]);
    }

    #[rstest]
    fn zero_ids_are_rejected_in_queries_too() {
        let err = shortest_path_lengths(&CHAIN, &[(0, 1)], None)
            .expect_err("zero ids must be rejected");
        assert!(matches!(err, GraphError::InvalidNodeId { index: 0 }));
    }

    #[rstest]
    fn stats_summarise_degrees_and_density() {
        let stats = graph_stats(&[(1, 2), (2, 3), (3, 1)]).expect("must succeed");
        assert_eq!(stats.node_count(), 3);
        assert_eq!(stats.edge_count(), 3);
        assert_eq!(stats.degrees().min(), 2);
        assert_eq!(stats.degrees().max(), 2);
        assert!((stats.degrees().mean() - 2.0).abs() < f64::EPSILON);
        assert!((stats.density() - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn self_loops_count_as_edges_but_not_degrees() {
        let stats = graph_stats(&[(1, 1), (1, 2)]).expect("must succeed");
        assert_eq!(stats.node_count(), 2);
        assert_eq!(stats.edge_count(), 2);
        assert_eq!(stats.degrees().max(), 1);
    }

    #[rstest]
    fn empty_edge_list_yields_zeroed_stats() {
        let stats = graph_stats(&[]).expect("empty input is valid");
        assert_eq!(stats.node_count(), 0);
        assert_eq!(stats.edge_count(), 0);
        assert_eq!(stats.density(), 0.0);
        assert_eq!(stats.degrees().mean(), 0.0);
    }
}
