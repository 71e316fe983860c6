//! First-appearance interning of external node identifiers.
//!
//! External ids are arbitrary 64-bit integers, frequently dense sequential
//! runs; the forward map therefore uses the Fx hash, which mixes integer keys
//! instead of passing them through. Dense indices are handed out in
//! first-appearance order, deliberately decoupling throughput from input
//! sortedness: callers that need reproducible component ids pin them through
//! the compressed labelling, never through raw interner order.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::NodeId;
use crate::index::DenseIndex;

/// Bijection between the distinct external ids seen so far and `[0, N)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct NodeInterner<I> {
    forward: FxHashMap<NodeId, I>,
    inverse: Vec<NodeId>,
}

impl<I: DenseIndex> NodeInterner<I> {
    /// Creates an interner sized for roughly `capacity` distinct ids.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            forward: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            inverse: Vec::with_capacity(capacity),
        }
    }

    /// Returns the dense index for `id`, assigning the next free one on
    /// first sight.
    ///
    /// The driver bounds the number of distinct ids by the input length
    /// before choosing the index width, so the width can never be exhausted
    /// here; that invariant is re-checked in debug builds.
    pub(crate) fn intern(&mut self, id: NodeId) -> usize {
        match self.forward.entry(id) {
            Entry::Occupied(slot) => slot.get().index(),
            Entry::Vacant(slot) => {
                let next = self.inverse.len();
                debug_assert!(next <= I::MAX, "dense index width exhausted");
                slot.insert(I::from_usize(next));
                self.inverse.push(id);
                next
            }
        }
    }

    /// Returns the dense index for `id` without interning it.
    pub(crate) fn lookup(&self, id: NodeId) -> Option<usize> {
        self.forward.get(&id).map(|index| index.index())
    }

    /// Returns the number of distinct ids interned so far.
    pub(crate) fn len(&self) -> usize {
        self.inverse.len()
    }

    /// Returns the external id assigned to dense index `index`.
    #[cfg(test)]
    pub(crate) fn node_id(&self, index: usize) -> NodeId {
        self.inverse[index]
    }

    /// Consumes the interner, yielding the inverse map (dense index →
    /// external id) for result translation.
    pub(crate) fn into_node_ids(self) -> Vec<NodeId> {
        self.inverse
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::NodeInterner;

    #[rstest]
    fn assigns_indices_in_first_appearance_order() {
        let mut interner = NodeInterner::<u32>::with_capacity(4);
        assert_eq!(interner.intern(50_000_000_001), 0);
        assert_eq!(interner.intern(7), 1);
        assert_eq!(interner.intern(50_000_000_001), 0);
        assert_eq!(interner.intern(8), 2);
        assert_eq!(interner.len(), 3);
    }

    #[rstest]
    fn inverse_map_translates_back() {
        let mut interner = NodeInterner::<u64>::with_capacity(2);
        interner.intern(22_361_810_781);
        interner.intern(3);
        assert_eq!(interner.node_id(0), 22_361_810_781);
        assert_eq!(interner.node_id(1), 3);
        assert_eq!(interner.into_node_ids(), vec![22_361_810_781, 3]);
    }
}
