//! A minimal proof-of-work ledger node: hash-linked blocks, a pending
//! transaction pool, and longest-valid-chain consensus between peers.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod shutdown;
pub mod transaction;

pub use error::{FetchError, LedgerError, MineError, Result};
