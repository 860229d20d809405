//! Node configuration read from the environment (after `.env` loading).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;
use uuid::Uuid;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    /// Cap on proof candidates tried per mining request; `None` is unbounded.
    pub max_iterations: Option<u64>,
    pub peer_timeout: Duration,
    /// Recipient of the mining reward.
    pub node_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            difficulty: DEFAULT_DIFFICULTY,
            max_iterations: None,
            peer_timeout: Duration::from_secs(5),
            node_id: new_node_id(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            difficulty: match parsed(&lookup, "POW_DIFFICULTY") {
                Some(d) if d > MAX_DIFFICULTY => {
                    warn!("CONFIG - POW_DIFFICULTY={d} can never be met (max {MAX_DIFFICULTY})");
                    defaults.difficulty
                }
                Some(d) => d,
                None => defaults.difficulty,
            },
            max_iterations: parsed(&lookup, "POW_MAX_ITERATIONS").or(defaults.max_iterations),
            peer_timeout: parsed(&lookup, "PEER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.peer_timeout),
            node_id: lookup("NODE_ID")
                .filter(|id| !id.trim().is_empty())
                .unwrap_or(defaults.node_id),
        }
    }
}

/// Random uuid v4 without dashes.
pub fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("CONFIG - ignoring unparseable {key}={raw:?}");
            None
        }
    }
}
