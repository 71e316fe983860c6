//! Shared helpers for the integration suites.

use std::collections::BTreeMap;

use renketsu_core::{ComponentsResult, NodeId};

/// Reduces a result to its partition: groups of sorted node ids, sorted by
/// smallest member. Labels are deliberately discarded so assertions pin the
/// equivalence classes, not the numbering.
pub fn partition(result: &ComponentsResult) -> Vec<Vec<NodeId>> {
    let mut by_label: BTreeMap<u64, Vec<NodeId>> = BTreeMap::new();
    for (node, label) in result.iter() {
        by_label.entry(label).or_default().push(node);
    }
    let mut groups: Vec<Vec<NodeId>> = by_label
        .into_values()
        .map(|mut group| {
            group.sort_unstable();
            group
        })
        .collect();
    groups.sort();
    groups
}

/// Returns component sizes sorted descending, for order-insensitive checks.
pub fn sizes_descending(result: &ComponentsResult) -> Vec<u64> {
    let mut sizes = result.sizes().to_vec();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}
