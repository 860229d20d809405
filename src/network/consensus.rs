use log::{info, warn};

use super::{ChainFetcher, NodeRegistry, PeerChain};
use crate::blockchain::{Block, Ledger, ProofOfWork, is_valid_chain};

/// Longest-valid-chain rule. Polls every registered peer and replaces the
/// local chain with the longest valid one strictly longer than ours.
/// Returns `true` when the chain was replaced. Peers that cannot be reached
/// or answer with garbage are skipped. The pending pool is never touched.
pub fn resolve_conflicts(
    nodes: &NodeRegistry,
    ledger: &mut Ledger,
    pow: &ProofOfWork,
    fetcher: &dyn ChainFetcher,
) -> bool {
    let answers = fetch_peer_chains(nodes, fetcher);
    adopt_longest(ledger, answers, pow)
}

/// Network half of [`resolve_conflicts`]: ask every peer for its chain.
/// Needs no access to the ledger, so callers can run it unlocked.
pub fn fetch_peer_chains(
    nodes: &NodeRegistry,
    fetcher: &dyn ChainFetcher,
) -> Vec<(String, PeerChain)> {
    let mut answers = Vec::with_capacity(nodes.len());
    for node in nodes.iter() {
        match fetcher.fetch_chain(node) {
            Ok(peer) => answers.push((node.to_string(), peer)),
            Err(e) => warn!("CONSENSUS - skipping {node}: {e}"),
        }
    }
    answers
}

/// Local half of [`resolve_conflicts`]: pick the longest valid answer that
/// beats the ledger's current length and swap it in.
pub fn adopt_longest(
    ledger: &mut Ledger,
    answers: Vec<(String, PeerChain)>,
    pow: &ProofOfWork,
) -> bool {
    let mut max_length = ledger.len();
    let mut new_chain: Option<Vec<Block>> = None;

    for (node, peer) in answers {
        if peer.length <= max_length {
            continue;
        }
        if !is_valid_chain(&peer.chain, pow) {
            info!(
                "CONSENSUS - {node} offered {} blocks but the chain is invalid",
                peer.length
            );
            continue;
        }

        max_length = peer.length;
        new_chain = Some(peer.chain);
    }

    match new_chain {
        Some(chain) if !chain.is_empty() => {
            info!(
                "CONSENSUS - replacing local chain ({} blocks) with {} blocks",
                ledger.len(),
                chain.len()
            );
            ledger.replace_chain(chain);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{adopt_longest, fetch_peer_chains, resolve_conflicts};
    use crate::blockchain::{Block, Ledger, ProofOfWork};
    use crate::error::FetchError;
    use crate::network::{ChainFetcher, NodeRegistry, PeerChain};
    use std::collections::HashMap;

    /// Answers from a fixed table; unknown peers fail with a 503.
    #[derive(Default)]
    struct FakeFetcher {
        chains: HashMap<String, Vec<Block>>,
        lengths: HashMap<String, usize>,
    }

    impl FakeFetcher {
        fn with(mut self, node: &str, chain: Vec<Block>) -> Self {
            self.lengths.insert(node.to_string(), chain.len());
            self.chains.insert(node.to_string(), chain);
            self
        }
    }

    impl ChainFetcher for FakeFetcher {
        fn fetch_chain(&self, address: &str) -> Result<PeerChain, FetchError> {
            match self.chains.get(address) {
                Some(chain) => Ok(PeerChain {
                    length: self.lengths[address],
                    chain: chain.clone(),
                }),
                None => Err(FetchError::Status(503)),
            }
        }
    }

    fn mined(pow: &ProofOfWork, blocks: usize) -> Ledger {
        let mut ledger = Ledger::new();
        while ledger.len() < blocks {
            ledger.add_transaction("0", "miner", 1);
            let proof = pow.solve(ledger.last_block().proof);
            ledger.seal_block(proof, None);
        }
        ledger
    }

    fn registry(nodes: &[&str]) -> NodeRegistry {
        let mut reg = NodeRegistry::new();
        for n in nodes {
            reg.register(n).unwrap();
        }
        reg
    }

    #[test]
    fn adopts_longer_valid_chain() {
        let pow = ProofOfWork::default();
        let mut local = mined(&pow, 2);
        local.add_transaction("a", "b", 3);
        let peer = mined(&pow, 3);

        let fetcher = FakeFetcher::default().with("peer:5000", peer.chain().to_vec());
        let replaced = resolve_conflicts(&registry(&["peer:5000"]), &mut local, &pow, &fetcher);

        assert!(replaced);
        assert_eq!(local.chain(), peer.chain());
        assert_eq!(local.pending().len(), 1);
    }

    #[test]
    fn keeps_local_when_peer_is_shorter() {
        let pow = ProofOfWork::default();
        let mut local = mined(&pow, 2);
        let before = local.chain().to_vec();

        let fetcher = FakeFetcher::default().with("peer:5000", Ledger::new().chain().to_vec());
        let replaced = resolve_conflicts(&registry(&["peer:5000"]), &mut local, &pow, &fetcher);

        assert!(!replaced);
        assert_eq!(local.chain(), before.as_slice());
    }

    #[test]
    fn equal_length_never_replaces() {
        let pow = ProofOfWork::default();
        let mut local = mined(&pow, 2);
        let before = local.chain().to_vec();
        let peer = mined(&pow, 2);

        let fetcher = FakeFetcher::default().with("peer:5000", peer.chain().to_vec());
        assert!(!resolve_conflicts(&registry(&["peer:5000"]), &mut local, &pow, &fetcher));
        assert_eq!(local.chain(), before.as_slice());
    }

    #[test]
    fn rejects_longer_invalid_chain() {
        let pow = ProofOfWork::default();
        let mut local = mined(&pow, 2);
        let before = local.chain().to_vec();

        // five blocks sealed with proofs that don't solve the puzzle
        let mut forged = Ledger::new();
        for p in 1..5 {
            forged.seal_block(p, None);
        }
        assert_eq!(forged.len(), 5);

        let fetcher = FakeFetcher::default().with("peer:5000", forged.chain().to_vec());
        assert!(!resolve_conflicts(&registry(&["peer:5000"]), &mut local, &pow, &fetcher));
        assert_eq!(local.chain(), before.as_slice());
    }

    #[test]
    fn unreachable_peers_are_skipped() {
        let pow = ProofOfWork::default();
        let mut local = Ledger::new();
        let peer = mined(&pow, 3);

        let fetcher = FakeFetcher::default().with("good:5000", peer.chain().to_vec());
        let nodes = registry(&["down:5000", "good:5000", "gone:5001"]);
        assert!(resolve_conflicts(&nodes, &mut local, &pow, &fetcher));
        assert_eq!(local.len(), 3);
    }

    #[test]
    fn picks_longest_of_several_peers() {
        let pow = ProofOfWork::default();
        let mut local = Ledger::new();
        let short = mined(&pow, 2);
        let long = mined(&pow, 4);

        let fetcher = FakeFetcher::default()
            .with("a:1", short.chain().to_vec())
            .with("b:2", long.chain().to_vec());
        assert!(resolve_conflicts(&registry(&["a:1", "b:2"]), &mut local, &pow, &fetcher));
        assert_eq!(local.chain(), long.chain());
    }

    #[test]
    fn no_peers_means_no_change() {
        let pow = ProofOfWork::default();
        let mut local = Ledger::new();
        let fetcher = FakeFetcher::default();
        assert!(!resolve_conflicts(&NodeRegistry::new(), &mut local, &pow, &fetcher));
        assert_eq!(local.len(), 1);
    }

    #[test]
    fn adoption_uses_length_at_lock_time() {
        let pow = ProofOfWork::default();
        let peer = mined(&pow, 3);
        let fetcher = FakeFetcher::default().with("peer:5000", peer.chain().to_vec());
        let answers = fetch_peer_chains(&registry(&["peer:5000", "down:1"]), &fetcher);
        assert_eq!(answers.len(), 1);

        // the local chain grew while peers were being fetched
        let mut local = mined(&pow, 3);
        let before = local.chain().to_vec();
        assert!(!adopt_longest(&mut local, answers.clone(), &pow));
        assert_eq!(local.chain(), before.as_slice());

        let mut behind = Ledger::new();
        assert!(adopt_longest(&mut behind, answers, &pow));
        assert_eq!(behind.chain(), peer.chain());
    }
}
