use crate::blockchain::{Block, Ledger, ProofOfWork};
use crate::config::Config;
use crate::network::{ChainFetcher, NodeRegistry};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Shared node state: one ledger and one peer registry per process.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub nodes: Mutex<NodeRegistry>,
    pub pow: ProofOfWork,
    pub max_iterations: Option<u64>,
    pub node_id: String,
    pub fetcher: Arc<dyn ChainFetcher>,
    /// Raised on shutdown; stops any proof search in flight.
    pub shutdown: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, fetcher: Arc<dyn ChainFetcher>) -> Self {
        Self {
            ledger: Mutex::new(Ledger::new()),
            nodes: Mutex::new(NodeRegistry::new()),
            pow: ProofOfWork::new(config.difficulty),
            max_iterations: config.max_iterations,
            node_id: config.node_id.clone(),
            fetcher,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub blockchain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct BlockInfoResponse {
    pub message: String,
    pub block: Block,
}

#[derive(Serialize)]
pub struct CheckResponse {
    pub result: &'static str,
}

/* ---------- Mining API Models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: Number,
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    #[serde(default)]
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chain: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<Block>>,
}
