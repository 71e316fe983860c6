//! Component labelling over a finalised forest.
//!
//! A single ascending scan of `0..N` assigns every node its component label
//! and accumulates component sizes; the `find` calls double as a final
//! flattening pass. Per-edge labels are then emitted straight from the
//! retained internal edge vector, so callers never run a follow-up gather.

use rustc_hash::FxHashMap;

use crate::index::DenseIndex;
use crate::union_find::DisjointSet;

/// Selects how component labels are numbered.
///
/// # Examples
/// ```
/// use renketsu_core::Labelling;
///
/// assert_eq!(Labelling::default(), Labelling::Compressed);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Labelling {
    /// Canonical contiguous labels in `[1, K]`, assigned in order of first
    /// encounter while scanning nodes `0..N`. Reproducible across runs and
    /// platforms for identical input order.
    #[default]
    Compressed,
    /// Labels are zero-based internal root indices: opaque identifiers that
    /// are only meaningful within the producing call. Persisting them across
    /// calls is a caller bug.
    Raw,
}

impl Labelling {
    /// Returns whether this mode emits canonical contiguous labels.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Compressed)
    }
}

/// Per-node labels plus component sizes in first-encounter order.
///
/// `sizes` is dense with one entry per component in both modes, so
/// `sizes.len()` is the component count and the entries sum to N. In
/// compressed mode `sizes[label - 1]` is the size of `label`'s component.
pub(crate) struct NodeLabels {
    pub(crate) labels: Vec<u64>,
    pub(crate) sizes: Vec<u64>,
}

/// Labels every node in the forest under the given mode.
pub(crate) fn label_nodes<I: DenseIndex>(
    forest: &mut DisjointSet<I>,
    mode: Labelling,
) -> NodeLabels {
    let len = forest.len();
    let mut labels = Vec::with_capacity(len);
    let mut sizes: Vec<u64> = Vec::new();
    let mut first_encounter: FxHashMap<usize, usize> = FxHashMap::default();

    for node in 0..len {
        let root = forest.find(node);
        let next = first_encounter.len();
        let ordinal = *first_encounter.entry(root).or_insert(next);
        if ordinal == sizes.len() {
            sizes.push(0);
        }
        sizes[ordinal] += 1;
        labels.push(match mode {
            Labelling::Compressed => (ordinal + 1) as u64,
            Labelling::Raw => root as u64,
        });
    }

    NodeLabels { labels, sizes }
}

/// Emits one label per edge from the per-node labels.
///
/// Both endpoints of a unioned edge share a root, so the from-side label is
/// the edge label; the invariant is re-checked in debug builds.
pub(crate) fn label_edges<I: DenseIndex>(labels: &[u64], edges: &[(I, I)]) -> Vec<u64> {
    edges
        .iter()
        .map(|edge| {
            debug_assert_eq!(
                labels[edge.0.index()],
                labels[edge.1.index()],
                "edge endpoints must share a component"
            );
            labels[edge.0.index()]
        })
        .collect()
}
