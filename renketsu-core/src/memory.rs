//! Pre-flight memory estimation for the dense connectivity pipeline.
//!
//! The engine allocates its working set up front (forest, inverse map,
//! internal edge vector), so the peak can be estimated before the first
//! large allocation and oversized inputs rejected with a typed error rather
//! than an allocator abort. The estimate is deliberately a little
//! pessimistic about hash-map overhead; it is a rejection threshold, not an
//! accounting figure.

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of an external node id (`u64`) in the inverse map.
const NODE_ID_BYTES: u64 = 8;

/// Per-node `rank` byte in the forest.
const RANK_BYTES: u64 = 1;

/// Estimated per-entry overhead of the forward interning map beyond the key
/// and value payload: control bytes plus load-factor headroom.
const FORWARD_MAP_OVERHEAD_BYTES: u64 = 8;

/// Per-node cost of the hypothetical dense-by-id layout the original
/// representation would allocate: one parent slot, one size counter, and the
/// rank byte, rounded to 12 bytes. Used only to decide when the sparse-id
/// advisory fires.
const DENSE_BY_ID_NODE_BYTES: u64 = 12;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;
const TIB: u64 = 1024 * GIB;

/// Default ceiling for the estimated working set, checked before the forest
/// is allocated.
pub const DEFAULT_MEMORY_LIMIT_BYTES: u64 = 32 * GIB;

/// Threshold above which a dense-by-id allocation is considered large enough
/// to warrant the one-time sparse-id advisory.
pub(crate) const SPARSE_ADVISORY_BYTES: u64 = 8 * GIB;

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Estimates the peak working set, in bytes, for `node_count` distinct
/// interned nodes and `edge_count` internal edge records at the given
/// internal index width (4 or 8 bytes).
///
/// Covers the forest (`parent` + `rank`), the interner (forward map +
/// inverse vector), and the internal edge vector retained for per-edge
/// labelling. All arithmetic saturates so absurd inputs cap at `u64::MAX`
/// instead of wrapping.
///
/// # Examples
///
/// ```
/// use renketsu_core::estimate_working_bytes;
///
/// assert_eq!(estimate_working_bytes(0, 0, 4), 0);
///
/// let narrow = estimate_working_bytes(1_000_000, 4_000_000, 4);
/// let wide = estimate_working_bytes(1_000_000, 4_000_000, 8);
/// assert!(wide > narrow);
/// ```
#[must_use]
pub fn estimate_working_bytes(node_count: u64, edge_count: u64, index_bytes: u64) -> u64 {
    // Forest: one parent slot and one rank byte per node.
    let forest = node_count.saturating_mul(index_bytes.saturating_add(RANK_BYTES));

    // Interner: inverse vector of external ids plus the forward map with
    // key, value, and per-entry overhead.
    let inverse = node_count.saturating_mul(NODE_ID_BYTES);
    let forward = node_count.saturating_mul(
        NODE_ID_BYTES
            .saturating_add(index_bytes)
            .saturating_add(FORWARD_MAP_OVERHEAD_BYTES),
    );

    // Internal edge vector: two endpoints per record.
    let edges = edge_count.saturating_mul(index_bytes.saturating_mul(2));

    forest
        .saturating_add(inverse)
        .saturating_add(forward)
        .saturating_add(edges)
}

/// Estimates what a dense-by-id allocation (indexing directly by the maximum
/// node id, as the uninterned representation would) would cost.
pub(crate) fn estimate_dense_by_id_bytes(max_node_id: u64) -> u64 {
    max_node_id.saturating_mul(DENSE_BY_ID_NODE_BYTES)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

const UNITS: [(&str, u64); 4] = [("TiB", TIB), ("GiB", GIB), ("MiB", MIB), ("KiB", KIB)];

/// Formats a byte count using binary units, one decimal place from 1 KiB up.
///
/// # Examples
///
/// ```
/// use renketsu_core::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536), "1.5 KiB");
/// assert_eq!(format_bytes(32 * 1024 * 1024 * 1024), "32.0 GiB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    for (label, divisor) in UNITS {
        if bytes >= divisor {
            return format!("{:.1} {label}", bytes as f64 / divisor as f64);
        }
    }
    format!("{bytes} B")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
