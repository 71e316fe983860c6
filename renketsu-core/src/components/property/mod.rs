//! Property-based tests for the component driver.
//!
//! Verifies the union-find pipeline against a sequential breadth-first
//! oracle over the external id space, and checks the universal invariants:
//! partition equivalence under permutation, duplicate/self-loop idempotence,
//! size accounting, and edge-label coherence.

mod oracle;
mod strategies;
