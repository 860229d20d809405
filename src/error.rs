//! Error types for the ledger node.

use thiserror::Error;

/// Input the core refuses to coerce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("invalid node address: {0}")]
    InvalidNodeAddress(String),
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),
}

/// Why a peer's chain could not be obtained. Always recoverable: the
/// resolver logs it and moves on to the next peer.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("peer answered with status {0}")]
    Status(u16),
    #[error("malformed chain response: {0}")]
    Malformed(String),
}

/// Why a mining request produced no block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MineError {
    #[error("no valid proof within {iterations} attempts")]
    Exhausted { iterations: u64 },
    #[error("proof search cancelled")]
    Cancelled,
    #[error("chain head moved while solving")]
    StaleHead,
    #[error("mining worker failed: {0}")]
    Worker(String),
}

/// Convenience alias used across the crate.
pub type Result<T, E = LedgerError> = std::result::Result<T, E>;
