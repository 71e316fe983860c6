//! Union-find (disjoint set forest) over a dense `[0, N)` index space.
//!
//! Both the component driver and the entity-resolution driver funnel their
//! merges through this structure. `find` uses the iterative two-pass
//! formulation: recursion is forbidden because input chains can reach depths
//! that would overflow the stack before the first compression pass.

use crate::index::DenseIndex;

/// Disjoint set forest with path compression and union by rank.
///
/// Indices outside `[0, len)` are a programmer error; they are checked only
/// by debug assertions, matching the contract that callers (the interner and
/// the labelling pass) never produce an out-of-range index.
#[derive(Clone, Debug)]
pub(crate) struct DisjointSet<I> {
    parent: Vec<I>,
    rank: Vec<u8>,
}

impl<I: DenseIndex> DisjointSet<I> {
    /// Creates a forest of `len` singleton sets.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: (0..len).map(I::from_usize).collect(),
            rank: vec![0; len],
        }
    }

    /// Returns the number of elements in the forest.
    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns the root of `node`, compressing the walked path.
    ///
    /// First pass locates the root; the second re-parents every node on the
    /// path directly to it.
    pub(crate) fn find(&mut self, node: usize) -> usize {
        debug_assert!(node < self.parent.len(), "node {node} out of range");

        let mut root = node;
        while self.parent[root].index() != root {
            root = self.parent[root].index();
        }

        let mut current = node;
        while self.parent[current].index() != current {
            let parent = self.parent[current].index();
            self.parent[current] = I::from_usize(root);
            current = parent;
        }

        root
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `false` when the two already share a root. On a rank tie the
    /// right root is attached under the left and the left rank grows.
    pub(crate) fn union(&mut self, left: usize, right: usize) -> bool {
        let left_root = self.find(left);
        let right_root = self.find(right);
        if left_root == right_root {
            return false;
        }

        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        if left_rank < right_rank {
            self.parent[left_root] = I::from_usize(right_root);
        } else {
            self.parent[right_root] = I::from_usize(left_root);
            if left_rank == right_rank {
                self.rank[left_root] = left_rank.saturating_add(1);
            }
        }
        true
    }

    /// Returns whether `left` and `right` share a root.
    pub(crate) fn same(&mut self, left: usize, right: usize) -> bool {
        self.find(left) == self.find(right)
    }
}
