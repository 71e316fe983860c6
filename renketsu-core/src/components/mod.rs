//! Connected-component driver over interned sparse node identifiers.
//!
//! One call runs the whole pipeline against caller-owned input:
//!
//! - validate the rows (ids start at 1, optional declared bound),
//! - intern every endpoint in a single pass, building the internal edge
//!   vector alongside,
//! - pre-flight the memory estimate against the configured limit,
//! - union the non-self-loop edges,
//! - label nodes (and edges) in one canonical scan.
//!
//! The engine keeps no state across calls; concurrent calls are safe as
//! long as each owns its inputs and outputs.

#[cfg(test)]
mod property;

use rayon::prelude::*;

use crate::NodeId;
use crate::error::{GraphError, Result};
use crate::index::{DenseIndex, NARROW_NODE_LIMIT};
use crate::interner::NodeInterner;
use crate::label::{Labelling, NodeLabels, label_edges, label_nodes};
use crate::memory::{
    DEFAULT_MEMORY_LIMIT_BYTES, SPARSE_ADVISORY_BYTES, estimate_dense_by_id_bytes,
    estimate_working_bytes,
};
use crate::result::{ComponentsResult, EdgeComponents};
use crate::union_find::DisjointSet;

/// Configures and constructs [`Connectivity`] engines.
///
/// # Examples
/// ```
/// use renketsu_core::{ConnectivityBuilder, Labelling};
///
/// let engine = ConnectivityBuilder::new()
///     .with_labelling(Labelling::Raw)
///     .with_node_bound(1_000)
///     .build();
/// assert_eq!(engine.labelling(), Labelling::Raw);
/// assert_eq!(engine.node_bound(), Some(1_000));
/// ```
#[derive(Debug, Clone)]
pub struct ConnectivityBuilder {
    labelling: Labelling,
    memory_limit: u64,
    node_bound: Option<NodeId>,
}

impl Default for ConnectivityBuilder {
    fn default() -> Self {
        Self {
            labelling: Labelling::Compressed,
            memory_limit: DEFAULT_MEMORY_LIMIT_BYTES,
            node_bound: None,
        }
    }
}

impl ConnectivityBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the component labelling mode (default
    /// [`Labelling::Compressed`]).
    #[must_use]
    pub fn with_labelling(mut self, labelling: Labelling) -> Self {
        self.labelling = labelling;
        self
    }

    /// Returns the configured labelling mode.
    #[must_use]
    pub fn labelling(&self) -> Labelling {
        self.labelling
    }

    /// Overrides the working-set ceiling in bytes (default 32 GiB).
    ///
    /// The estimate is checked after interning and before the forest is
    /// allocated; see [`crate::estimate_working_bytes`].
    #[must_use]
    pub fn with_memory_limit(mut self, bytes: u64) -> Self {
        self.memory_limit = bytes;
        self
    }

    /// Returns the configured working-set ceiling in bytes.
    #[must_use]
    pub fn memory_limit(&self) -> u64 {
        self.memory_limit
    }

    /// Declares an upper bound on node ids, for validation only.
    ///
    /// Inputs containing an id above the bound fail with
    /// [`GraphError::InvalidNodeRange`]. The bound never influences
    /// allocation: the engine always allocates for the dense interned node
    /// count, so a sparse bound costs nothing.
    #[must_use]
    pub fn with_node_bound(mut self, bound: NodeId) -> Self {
        self.node_bound = Some(bound);
        self
    }

    /// Returns the declared node bound, if any.
    #[must_use]
    pub fn node_bound(&self) -> Option<NodeId> {
        self.node_bound
    }

    /// Constructs the engine.
    ///
    /// Every combination of settings is valid at build time; bounds and
    /// limits are enforced per call against the actual input.
    #[must_use]
    pub fn build(self) -> Connectivity {
        Connectivity {
            labelling: self.labelling,
            memory_limit: self.memory_limit,
            node_bound: self.node_bound,
        }
    }
}

/// Entry point for the batch connectivity operations.
///
/// # Examples
/// ```
/// use renketsu_core::ConnectivityBuilder;
///
/// let engine = ConnectivityBuilder::new().build();
/// let result = engine.components(&[(1, 2), (2, 3), (5, 6), (8, 9), (9, 10)])?;
/// assert_eq!(result.component_count(), 3);
/// assert_eq!(result.sizes(), [3, 2, 3]);
/// # Ok::<(), renketsu_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Connectivity {
    labelling: Labelling,
    memory_limit: u64,
    node_bound: Option<NodeId>,
}

impl Connectivity {
    /// Returns the labelling mode used by this engine.
    #[must_use]
    pub fn labelling(&self) -> Labelling {
        self.labelling
    }

    /// Returns the working-set ceiling in bytes.
    #[must_use]
    pub fn memory_limit(&self) -> u64 {
        self.memory_limit
    }

    /// Returns the declared node bound, if any.
    #[must_use]
    pub fn node_bound(&self) -> Option<NodeId> {
        self.node_bound
    }

    /// Assigns every distinct node in `edges` to its connected component.
    ///
    /// Self-loops are accepted and contribute no merge; duplicate edges are
    /// idempotent; an empty edge list yields an empty result.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNodeId`] for a zero id,
    /// [`GraphError::InvalidNodeRange`] when an id exceeds the declared
    /// bound, and [`GraphError::CapacityExceeded`] when the estimated
    /// working set exceeds the configured limit.
    pub fn components(&self, edges: &[(NodeId, NodeId)]) -> Result<ComponentsResult> {
        if needs_wide_index(edges.len(), 0) {
            self.components_at::<u64>(edges)
        } else {
            self.components_at::<u32>(edges)
        }
    }

    /// Returns the component label of every edge, in input order.
    ///
    /// Both endpoints of an edge share a component by construction, so one
    /// label per edge is complete. This is the per-edge join primitive:
    /// the labels come out of the labelling scan itself, not a second
    /// lookup pass.
    ///
    /// # Errors
    /// As for [`Self::components`].
    pub fn edge_components(&self, edges: &[(NodeId, NodeId)]) -> Result<EdgeComponents> {
        if needs_wide_index(edges.len(), 0) {
            self.edge_components_at::<u64>(edges)
        } else {
            self.edge_components_at::<u32>(edges)
        }
    }

    /// Answers, for each query pair, whether the two nodes are connected by
    /// `edges`.
    ///
    /// Query endpoints never seen in `edges` are treated as their own
    /// singletons: `(a, a)` is connected for any valid `a`, and an unknown
    /// endpoint connects to nothing else.
    ///
    /// # Errors
    /// As for [`Self::components`]; zero ids in `queries` are rejected the
    /// same way as zero ids in `edges`.
    pub fn are_connected(
        &self,
        edges: &[(NodeId, NodeId)],
        queries: &[(NodeId, NodeId)],
    ) -> Result<Vec<bool>> {
        if needs_wide_index(edges.len(), queries.len()) {
            self.are_connected_at::<u64>(edges, queries)
        } else {
            self.are_connected_at::<u32>(edges, queries)
        }
    }

    fn components_at<I: DenseIndex>(&self, edges: &[(NodeId, NodeId)]) -> Result<ComponentsResult> {
        let mut run = self.prepare::<I>(edges, &[])?;
        let NodeLabels { labels, sizes } = label_nodes(&mut run.forest, self.labelling);
        tracing::debug!(
            nodes = run.interner.len(),
            edges = edges.len(),
            components = sizes.len(),
            "connected components computed"
        );
        Ok(ComponentsResult::new(
            run.interner.into_node_ids(),
            labels,
            sizes,
            self.labelling,
        ))
    }

    fn edge_components_at<I: DenseIndex>(
        &self,
        edges: &[(NodeId, NodeId)],
    ) -> Result<EdgeComponents> {
        let mut run = self.prepare::<I>(edges, &[])?;
        let NodeLabels { labels, sizes } = label_nodes(&mut run.forest, self.labelling);
        let edge_labels = label_edges(&labels, &run.edge_ends);
        tracing::debug!(
            nodes = run.interner.len(),
            edges = edges.len(),
            components = sizes.len(),
            "edge components computed"
        );
        Ok(EdgeComponents::new(edge_labels, sizes.len()))
    }

    fn are_connected_at<I: DenseIndex>(
        &self,
        edges: &[(NodeId, NodeId)],
        queries: &[(NodeId, NodeId)],
    ) -> Result<Vec<bool>> {
        let mut run = self.prepare::<I>(edges, queries)?;
        let answers = run
            .query_ends
            .iter()
            .map(|&(left, right)| run.forest.same(left.index(), right.index()))
            .collect();
        Ok(answers)
    }

    /// Shared front half of every operation: validate, intern, pre-flight,
    /// union. Query endpoints are interned into the same id space so they
    /// participate as singletons, but only edges drive unions.
    fn prepare<I: DenseIndex>(
        &self,
        edges: &[(NodeId, NodeId)],
        queries: &[(NodeId, NodeId)],
    ) -> Result<PreparedRun<I>> {
        let max_edge_id = validate_rows(edges)?;
        let max_query_id = validate_rows(queries)?;
        let max_id = max_edge_id.max(max_query_id);
        if let Some(bound) = self.node_bound
            && max_id > bound
        {
            return Err(GraphError::InvalidNodeRange {
                max_id,
                node_bound: bound,
            });
        }

        let mut interner =
            NodeInterner::<I>::with_capacity(edges.len().saturating_add(queries.len()));
        let mut edge_ends = Vec::with_capacity(edges.len());
        for &(from, to) in edges {
            let from = interner.intern(from);
            let to = interner.intern(to);
            edge_ends.push((I::from_usize(from), I::from_usize(to)));
        }
        let mut query_ends = Vec::with_capacity(queries.len());
        for &(left, right) in queries {
            let left = interner.intern(left);
            let right = interner.intern(right);
            query_ends.push((I::from_usize(left), I::from_usize(right)));
        }

        let nodes = interner.len();
        if estimate_dense_by_id_bytes(max_id) > SPARSE_ADVISORY_BYTES {
            tracing::warn!(
                max_node_id = max_id,
                interned_nodes = nodes,
                "node ids are sparse; proceeding with the dense interned representation"
            );
        }

        let estimated_bytes = estimate_working_bytes(
            nodes as u64,
            (edges.len() + queries.len()) as u64,
            size_of::<I>() as u64,
        );
        if estimated_bytes > self.memory_limit {
            return Err(GraphError::CapacityExceeded {
                nodes: nodes as u64,
                estimated_bytes,
                limit_bytes: self.memory_limit,
            });
        }

        let mut forest = DisjointSet::<I>::new(nodes);
        for &(from, to) in &edge_ends {
            if from != to {
                forest.union(from.index(), to.index());
            }
        }

        Ok(PreparedRun {
            interner,
            edge_ends,
            query_ends,
            forest,
        })
    }
}

/// Working state shared by the back half of each operation.
struct PreparedRun<I> {
    interner: NodeInterner<I>,
    edge_ends: Vec<(I, I)>,
    query_ends: Vec<(I, I)>,
    forest: DisjointSet<I>,
}

/// Decides the internal index width from the distinct-node upper bound
/// (`2 * rows`), so a narrow run can never exhaust its index mid-pass.
fn needs_wide_index(edges: usize, queries: usize) -> bool {
    edges.saturating_add(queries).saturating_mul(2) >= NARROW_NODE_LIMIT
}

/// Scans rows in parallel, rejecting zero ids and reporting the largest id
/// seen. The scan is order-independent, so splitting it across threads
/// cannot change the outcome.
pub(crate) fn validate_rows(rows: &[(NodeId, NodeId)]) -> Result<NodeId> {
    rows.par_iter()
        .enumerate()
        .map(|(index, &(left, right))| {
            if left == 0 || right == 0 {
                Err(GraphError::InvalidNodeId { index })
            } else {
                Ok(left.max(right))
            }
        })
        .try_reduce(|| 0, |left, right| Ok(left.max(right)))
}
