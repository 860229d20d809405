use log::debug;
use serde_json::Number;

use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
#[derive(Debug, Clone)]
pub struct Ledger {
    chain: Vec<Block>,
    current_transactions: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            current_transactions: Vec::new(),
        };
        ledger.seal_block(GENESIS_PROOF, Some(GENESIS_PREVIOUS_HASH.to_string()));
        ledger
    }

    /// Queue a transaction for the next block and return that block's index.
    pub fn add_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<Number>,
    ) -> u64 {
        let tx = Transaction::new(sender, recipient, amount);
        debug!(
            "POOL - queued {} -> {} ({}), pool size {}",
            tx.sender,
            tx.recipient,
            tx.amount,
            self.current_transactions.len() + 1
        );
        self.current_transactions.push(tx);
        self.last_block().index + 1
    }

    /// Seal the whole pending pool into a new block and append it.
    /// `previous_hash` defaults to the digest of the current last block.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = match previous_hash {
            Some(hash) => hash,
            None => self.last_block().compute_hash(),
        };
        let transactions = std::mem::take(&mut self.current_transactions);
        let block = Block::new(
            self.chain.len() as u64 + 1,
            transactions,
            proof,
            previous_hash,
        );
        debug!(
            "SEAL - block #{} with {} txs (proof={})",
            block.index,
            block.transactions.len(),
            block.proof
        );
        self.chain.push(block);
        self.last_block()
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.current_transactions
    }

    /// Block at 1-based `index`, as stored in [`Block::index`].
    pub fn block(&self, index: u64) -> Option<&Block> {
        let pos = usize::try_from(index.checked_sub(1)?).ok()?;
        self.chain.get(pos)
    }

    /// Swap in a whole chain at once. The pending pool is left untouched.
    /// Empty chains are ignored so the ledger never loses its genesis.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        if chain.is_empty() {
            return;
        }
        self.chain = chain;
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
