use std::sync::atomic::{AtomicBool, Ordering};

use super::block::hash_hex;
use super::DEFAULT_DIFFICULTY;

/// Result of a bounded proof search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowOutcome {
    Found(u64),
    /// The iteration cap was reached without a valid proof.
    Exhausted { iterations: u64 },
    Cancelled,
}

/// The proof-of-work puzzle: find `proof` such that
/// `sha256(str(last_proof * proof))` starts with `difficulty` hex zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn is_valid_proof(&self, last_proof: u64, proof: u64) -> bool {
        // u128 holds any product of two u64 values.
        let guess = (u128::from(last_proof) * u128::from(proof)).to_string();
        let digest = hash_hex(guess.as_bytes());
        let zeros = self.difficulty as usize;
        digest.len() >= zeros && digest.bytes().take(zeros).all(|c| c == b'0')
    }

    /// Linear search from 0 upward with no bound. Never returns when no
    /// solution exists (e.g. `last_proof == 0`); use [`ProofOfWork::solve_with`]
    /// on anything that must stay responsive.
    pub fn solve(&self, last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !self.is_valid_proof(last_proof, proof) {
            proof += 1;
        }
        proof
    }

    /// Same search as [`ProofOfWork::solve`], but stops after `max_iterations`
    /// candidates (when set) or as soon as `cancel` is raised.
    pub fn solve_with(
        &self,
        last_proof: u64,
        max_iterations: Option<u64>,
        cancel: &AtomicBool,
    ) -> PowOutcome {
        let mut proof = 0u64;
        loop {
            if cancel.load(Ordering::Relaxed) {
                return PowOutcome::Cancelled;
            }
            if max_iterations.is_some_and(|cap| proof >= cap) {
                return PowOutcome::Exhausted { iterations: proof };
            }
            if self.is_valid_proof(last_proof, proof) {
                return PowOutcome::Found(proof);
            }
            proof = match proof.checked_add(1) {
                Some(next) => next,
                None => return PowOutcome::Exhausted { iterations: proof },
            };
        }
    }
}
