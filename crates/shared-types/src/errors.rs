//! # Error Types
//!
//! Errors raised while converting host-pipeline data into domain types.

use thiserror::Error;

/// Reasons a host header cannot be converted into a [`crate::BlockHeader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Heights start at 1; zero and negative heights are never produced by the host.
    #[error("Invalid height: {height} (must be >= 1)")]
    InvalidHeight { height: i64 },

    /// Header carried no timestamp.
    #[error("Header timestamp missing")]
    MissingTimestamp,

    /// Timestamp nanos outside `[0, 1e9)` or negative seconds.
    #[error("Invalid timestamp: {seconds}s {nanos}ns")]
    InvalidTimestamp { seconds: i64, nanos: i32 },

    /// Chain id longer than [`crate::MAX_CHAIN_ID_LEN`].
    #[error("Invalid chain id length: {len}")]
    InvalidChainId { len: usize },

    /// Proposer address is not [`crate::ADDRESS_LEN`] bytes.
    #[error("Invalid proposer address length: {len} (expected {expected})")]
    InvalidProposer { len: usize, expected: usize },

    /// Parent hash must be empty (genesis) or [`crate::HASH_LEN`] bytes.
    #[error("Invalid last block hash length: {len}")]
    InvalidLastBlockHash { len: usize },
}
