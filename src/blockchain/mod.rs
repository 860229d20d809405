pub mod block;
pub mod codec;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use model::Ledger;
pub use pow::{PowOutcome, ProofOfWork};
pub use validation::is_valid_chain;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// A SHA-256 hex digest has 64 characters; more zeros can never be met.
pub const MAX_DIFFICULTY: u32 = 64;

/// Agreed proof of the genesis block; it is not the output of a search.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block. No SHA-256 hex digest equals it,
/// and it is written on the wire as the JSON integer `1`.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Sender used for the reward transaction added to every mined block.
pub const REWARD_SENDER: &str = "0";

/// Amount of the mining reward transaction.
pub const MINING_REWARD: u64 = 1;
