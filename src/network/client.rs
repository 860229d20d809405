use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::error::FetchError;

/// A peer's answer to `GET /chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub length: usize,
    #[serde(rename = "blockchain")]
    pub chain: Vec<Block>,
}

/// Ask a peer for its full chain.
pub trait ChainFetcher: Send + Sync {
    fn fetch_chain(&self, address: &str) -> Result<PeerChain, FetchError>;
}

/// [`ChainFetcher`] backed by a blocking HTTP client. Must not be called
/// from an async executor thread.
#[derive(Debug, Clone)]
pub struct HttpChainFetcher {
    client: Client,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ChainFetcher for HttpChainFetcher {
    fn fetch_chain(&self, address: &str) -> Result<PeerChain, FetchError> {
        let response = self.client.get(format!("http://{address}/chain")).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: PeerChain = response
            .json()
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        check_length(body)
    }
}

/// Reject answers whose reported length disagrees with the blocks sent,
/// so a peer cannot win consensus by over-reporting.
pub fn check_length(body: PeerChain) -> Result<PeerChain, FetchError> {
    if body.length != body.chain.len() {
        return Err(FetchError::Malformed(format!(
            "reported length {} but sent {} blocks",
            body.length,
            body.chain.len()
        )));
    }
    Ok(body)
}
