use log::debug;

use super::{Block, ProofOfWork};

/// Check hash linkage and proof validity for every adjacent pair of
/// blocks. Empty and single-block chains are valid. The genesis block
/// itself is not inspected.
pub fn is_valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    for pair in chain.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);

        let expected = previous.compute_hash();
        if current.previous_hash != expected {
            debug!(
                "VALIDATE - block #{} links to {} but block #{} hashes to {}",
                current.index, current.previous_hash, previous.index, expected
            );
            return false;
        }

        if !pow.is_valid_proof(previous.proof, current.proof) {
            debug!(
                "VALIDATE - block #{} proof {} does not solve last proof {}",
                current.index, current.proof, previous.proof
            );
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::is_valid_chain;
    use crate::blockchain::{Block, Ledger, ProofOfWork};

    /// Genesis plus two mined blocks, each carrying one transaction.
    fn three_block_chain(pow: &ProofOfWork) -> Vec<Block> {
        let mut ledger = Ledger::new();
        for i in 0..2 {
            ledger.add_transaction("alice", "bob", 10 + i);
            let proof = pow.solve(ledger.last_block().proof);
            ledger.seal_block(proof, None);
        }
        ledger.chain().to_vec()
    }

    #[test]
    fn trivial_chains_are_valid() {
        let pow = ProofOfWork::default();
        assert!(is_valid_chain(&[], &pow));
        assert!(is_valid_chain(Ledger::new().chain(), &pow));
    }

    #[test]
    fn mined_chain_is_valid() {
        let pow = ProofOfWork::default();
        assert!(is_valid_chain(&three_block_chain(&pow), &pow));
    }

    #[test]
    fn rejects_tampered_amount() {
        let pow = ProofOfWork::default();
        let chain = three_block_chain(&pow);
        // any block except the tip is covered by its successor's previous_hash
        for i in 0..2 {
            let mut tampered = chain.clone();
            if let Some(tx) = tampered[i].transactions.first_mut() {
                tx.amount = 1_000_000.into();
            } else {
                tampered[i].timestamp += 1.0;
            }
            assert!(!is_valid_chain(&tampered, &pow), "block {i}");
        }
    }

    #[test]
    fn rejects_tampered_proof() {
        let pow = ProofOfWork::default();
        let chain = three_block_chain(&pow);
        for i in 0..3 {
            let mut tampered = chain.clone();
            tampered[i].proof += 1;
            assert!(!is_valid_chain(&tampered, &pow), "block {i}");
        }
    }

    #[test]
    fn rejects_tampered_previous_hash() {
        let pow = ProofOfWork::default();
        let chain = three_block_chain(&pow);
        for i in 0..3 {
            let mut tampered = chain.clone();
            tampered[i].previous_hash = "f".repeat(64);
            assert!(!is_valid_chain(&tampered, &pow), "block {i}");
        }
    }
}
