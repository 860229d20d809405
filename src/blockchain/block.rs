use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::codec::{self, canonical_json};
use crate::transaction::Transaction;

/// A sealed block. Blocks are never mutated after being appended to a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    #[serde(with = "codec::previous_hash")]
    pub previous_hash: String,
}

impl Block {
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Canonical JSON encoding of this block (see [`codec`]). Two blocks
    /// with equal field values always encode to the same bytes, on this
    /// node and on nodes hashing with `json.dumps(block, sort_keys=True)`.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_json(self).expect("encode block")
    }

    /// SHA-256 hex digest of [`Block::canonical_bytes`].
    pub fn compute_hash(&self) -> String {
        hash_hex(&self.canonical_bytes())
    }
}

/// SHA-256 of `data`, lowercase hex.
pub fn hash_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
