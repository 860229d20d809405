pub mod client;
pub mod consensus;
pub mod registry;

pub use client::{ChainFetcher, HttpChainFetcher, PeerChain};
pub use consensus::{adopt_longest, fetch_peer_chains, resolve_conflicts};
pub use registry::NodeRegistry;
