use std::collections::HashSet;

use log::info;
use reqwest::Url;

use crate::error::{LedgerError, Result};

/// Known peers, stored as `host:port`.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    nodes: HashSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer given as `http://host:port/...` or bare `host:port`.
    /// Only `host:port` is kept; registering the same peer twice is a no-op.
    pub fn register(&mut self, address: &str) -> Result<()> {
        let netloc = parse_netloc(address)?;
        if self.nodes.insert(netloc.clone()) {
            info!("NODES - registered peer {netloc}");
        }
        Ok(())
    }

    pub fn contains(&self, netloc: &str) -> bool {
        self.nodes.contains(netloc)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Registered peers, sorted for stable output.
    pub fn list(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.nodes.iter().cloned().collect();
        nodes.sort();
        nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn parse_netloc(address: &str) -> Result<String> {
    let trimmed = address.trim();
    let invalid = || LedgerError::InvalidNodeAddress(address.to_string());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{trimmed}"))
    }
    .map_err(|_| invalid())?;

    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
    // `port()` is None for the scheme's default port, so fall back to it
    // when the address spelled a port out explicitly.
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None if has_explicit_port(trimmed) => match url.port_or_known_default() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        },
        None => host.to_string(),
    })
}

fn has_explicit_port(address: &str) -> bool {
    let rest = address.split_once("://").map_or(address, |(_, r)| r);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    authority
        .rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}
