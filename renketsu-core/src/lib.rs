//! Renketsu core library.
//!
//! A batch connectivity engine. Given an edge list over a sparse 64-bit
//! node-id space, it assigns each node (and each edge) to its connected
//! component in near-linear time, with memory linear in the number of
//! *distinct* nodes rather than the maximum id. On the same union-find
//! core it exposes a multi-column entity-resolution mode that groups
//! records sharing any value across designated columns.
//!
//! Every operation is single-threaded per call and owns all state it
//! touches; independent calls may run concurrently from separate threads.
//!
//! # Determinism
//!
//! Internal indices are assigned by first appearance, so raw
//! ([`Labelling::Raw`]) labels depend on input order and are only
//! meaningful within one call. Compressed labels are canonicalised by an
//! ascending node scan and are reproducible across runs and platforms for
//! identical input order.

mod analysis;
mod components;
mod error;
mod index;
mod interner;
mod label;
mod memory;
mod resolve;
mod result;
mod union_find;

pub use crate::{
    analysis::{DegreeStats, GraphStats, graph_stats, shortest_path_lengths},
    components::{Connectivity, ConnectivityBuilder},
    error::{GraphError, GraphErrorCode, Result},
    label::Labelling,
    memory::{DEFAULT_MEMORY_LIMIT_BYTES, estimate_working_bytes, format_bytes},
    resolve::{
        Column, DEFAULT_INCOMPARABLES, GroupingResult, ResolveError, ResolveErrorCode, Resolver,
        ResolverBuilder,
    },
    result::{ComponentsResult, EdgeComponents},
};

/// External node identifier: an unsigned 64-bit integer, at least 1.
///
/// Ids need not be contiguous or bounded; the engine interns them onto a
/// dense internal range, so memory scales with the number of distinct ids.
pub type NodeId = u64;
