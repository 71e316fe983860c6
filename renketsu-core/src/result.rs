//! Result types for the graph operations.
//!
//! Packages node labels, component sizes, and per-edge labels produced by
//! [`Connectivity`]. Results carry the inverse interner map so callers keyed
//! by external node ids never need a second translation pass.
//!
//! [`Connectivity`]: crate::Connectivity

use crate::NodeId;
use crate::label::Labelling;

/// Per-node component assignment from [`Connectivity::components`].
///
/// Nodes appear in first-appearance order; `node_ids()[i]` is the external
/// id whose label is `labels()[i]`. Sizes are dense with one entry per
/// component and sum to the node count.
///
/// # Examples
/// ```
/// use renketsu_core::ConnectivityBuilder;
///
/// let engine = ConnectivityBuilder::new().build();
/// let result = engine.components(&[(1, 2), (2, 3), (5, 6)])?;
/// assert_eq!(result.component_count(), 2);
/// assert_eq!(result.sizes(), [3, 2]);
/// assert_eq!(result.node_ids(), [1, 2, 3, 5, 6]);
/// assert_eq!(result.labels(), [1, 1, 1, 2, 2]);
/// # Ok::<(), renketsu_core::GraphError>(())
/// ```
///
/// [`Connectivity::components`]: crate::Connectivity::components
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentsResult {
    node_ids: Vec<NodeId>,
    labels: Vec<u64>,
    sizes: Vec<u64>,
    labelling: Labelling,
}

impl ComponentsResult {
    pub(crate) fn new(
        node_ids: Vec<NodeId>,
        labels: Vec<u64>,
        sizes: Vec<u64>,
        labelling: Labelling,
    ) -> Self {
        debug_assert_eq!(node_ids.len(), labels.len());
        Self {
            node_ids,
            labels,
            sizes,
            labelling,
        }
    }

    /// Returns the external node ids in first-appearance order.
    #[must_use]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Returns the per-node component labels, aligned with [`Self::node_ids`].
    #[must_use]
    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// Returns component sizes in first-encounter order.
    ///
    /// Under [`Labelling::Compressed`], `sizes()[label - 1]` is the size of
    /// `label`'s component. The entries always sum to [`Self::node_count`].
    #[must_use]
    pub fn sizes(&self) -> &[u64] {
        &self.sizes
    }

    /// Returns the number of connected components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Returns the number of distinct nodes seen in the input.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Returns the labelling mode the result was produced under.
    #[must_use]
    pub fn labelling(&self) -> Labelling {
        self.labelling
    }

    /// Iterates `(external id, label)` pairs in first-appearance order.
    ///
    /// # Examples
    /// ```
    /// use renketsu_core::ConnectivityBuilder;
    ///
    /// let engine = ConnectivityBuilder::new().build();
    /// let result = engine.components(&[(8, 9)])?;
    /// let pairs: Vec<_> = result.iter().collect();
    /// assert_eq!(pairs, [(8, 1), (9, 1)]);
    /// # Ok::<(), renketsu_core::GraphError>(())
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, u64)> + '_ {
        self.node_ids
            .iter()
            .copied()
            .zip(self.labels.iter().copied())
    }
}

/// Per-edge component assignment from [`Connectivity::edge_components`].
///
/// Entry `i` is the component label shared by both endpoints of input edge
/// `i`; the engine computes it during labelling, so no caller-side scatter
/// over node labels is ever needed.
///
/// # Examples
/// ```
/// use renketsu_core::ConnectivityBuilder;
///
/// let engine = ConnectivityBuilder::new().build();
/// let result = engine.edge_components(&[(1, 2), (2, 3), (5, 6)])?;
/// assert_eq!(result.labels(), [1, 1, 2]);
/// assert_eq!(result.component_count(), 2);
/// # Ok::<(), renketsu_core::GraphError>(())
/// ```
///
/// [`Connectivity::edge_components`]: crate::Connectivity::edge_components
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeComponents {
    labels: Vec<u64>,
    component_count: usize,
}

impl EdgeComponents {
    pub(crate) fn new(labels: Vec<u64>, component_count: usize) -> Self {
        Self {
            labels,
            component_count,
        }
    }

    /// Returns one component label per input edge, in input order.
    #[must_use]
    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// Returns the number of connected components over all seen nodes.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.component_count
    }

    /// Consumes the result, yielding the per-edge label vector.
    #[must_use]
    pub fn into_labels(self) -> Vec<u64> {
        self.labels
    }
}
