//! Error types for the graph path of the engine.
//!
//! Defines the error enum surfaced by [`Connectivity`] operations, its
//! stable machine-readable codes, and the crate result alias. Every error is
//! fatal for the operation that raised it: no partial results are returned
//! and nothing is retried.
//!
//! [`Connectivity`]: crate::Connectivity

use std::fmt;

use thiserror::Error;

use crate::memory::format_bytes;

/// Stable codes describing [`GraphError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GraphErrorCode {
    /// An input row contained a node id of zero.
    InvalidNodeId,
    /// An observed node id exceeded the declared node bound.
    InvalidNodeRange,
    /// The estimated working set exceeded the configured memory limit.
    CapacityExceeded,
}

impl GraphErrorCode {
    /// Returns the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidNodeId => "INVALID_NODE_ID",
            Self::InvalidNodeRange => "INVALID_NODE_RANGE",
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
        }
    }
}

impl fmt::Display for GraphErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced by the graph operations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An input row contained a node id of zero; external ids start at 1.
    /// (Negative ids cannot be expressed at this boundary: the input type is
    /// unsigned.)
    #[error("input row {index} contains node id 0; node ids must be at least 1")]
    InvalidNodeId {
        /// Row within the offending edge or query slice.
        index: usize,
    },
    /// An observed node id exceeded the caller-declared bound.
    #[error("node id {max_id} exceeds the declared node bound {node_bound}")]
    InvalidNodeRange {
        /// Largest node id observed in the input.
        max_id: u64,
        /// The bound the caller declared.
        node_bound: u64,
    },
    /// The estimated dense working set exceeded the configured limit.
    ///
    /// Raised before any forest allocation; the inputs were only scanned.
    #[error(
        "{nodes} distinct nodes need an estimated {}, exceeding the {} limit; \
         remap node ids to a dense range or raise the memory limit",
        format_bytes(*.estimated_bytes),
        format_bytes(*.limit_bytes)
    )]
    CapacityExceeded {
        /// Distinct nodes interned from the input.
        nodes: u64,
        /// Estimated peak working set in bytes.
        estimated_bytes: u64,
        /// The configured limit in bytes.
        limit_bytes: u64,
    },
}

impl GraphError {
    /// Retrieve the stable [`GraphErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::InvalidNodeId { .. } => GraphErrorCode::InvalidNodeId,
            Self::InvalidNodeRange { .. } => GraphErrorCode::InvalidNodeRange,
            Self::CapacityExceeded { .. } => GraphErrorCode::CapacityExceeded,
        }
    }
}

/// Convenient alias for results returned by the graph operations.
pub type Result<T> = core::result::Result<T, GraphError>;
