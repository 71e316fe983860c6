//! Deterministic input generators for the renketsu benchmarks.
//!
//! All generators are seeded so runs are comparable across machines and
//! revisions. Sizes are chosen to keep a full bench run in seconds while
//! still exercising the interner's hash behaviour on both dense and sparse
//! id spaces.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use renketsu_core::{Column, NodeId};

/// Generates `edge_count` random edges over dense sequential ids
/// `1..=node_pool`.
#[must_use]
pub fn dense_edges(node_pool: u64, edge_count: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..edge_count)
        .map(|_| {
            (
                rng.gen_range(1..=node_pool),
                rng.gen_range(1..=node_pool),
            )
        })
        .collect()
}

/// Generates `edge_count` random edges over a pool of ids scattered across
/// the 64-bit space, the worst case for identity-style hashing.
#[must_use]
pub fn sparse_edges(pool_size: usize, edge_count: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let pool: Vec<NodeId> = (0..pool_size)
        .map(|_| rng.gen_range(1..=u64::MAX / 2))
        .collect();
    (0..edge_count)
        .map(|_| {
            (
                pool[rng.gen_range(0..pool.len())],
                pool[rng.gen_range(0..pool.len())],
            )
        })
        .collect()
}

/// Generates contact-style text columns where a slice of the rows share
/// values, driving real merge work in the resolver.
#[must_use]
pub fn shared_value_columns(rows: usize, distinct_values: usize, seed: u64) -> Vec<Column> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let column = |rng: &mut SmallRng| {
        Column::Text(
            (0..rows)
                .map(|_| {
                    if rng.gen_bool(0.2) {
                        String::new()
                    } else {
                        format!("value-{}", rng.gen_range(0..distinct_values))
                    }
                })
                .collect(),
        )
    };
    vec![column(&mut rng), column(&mut rng), column(&mut rng)]
}
