//! Node configuration
//!
//! A config file is optional; every field has a CLI flag. File values load
//! first, flags passed explicitly override them in `main`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP bind address
    pub rpc_addr: String,
    /// Directory for the persistent store
    pub data_dir: PathBuf,
    /// Validator identities, in rotation order. Must match on every peer.
    pub authorities: Vec<String>,
    /// Base URLs of sibling instances
    pub peers: Vec<String>,
    /// Pending votes per block
    pub batch_threshold: usize,
    /// Whole-chain read budget in milliseconds
    pub read_timeout_ms: u64,
    /// Per-request budget for peer calls in milliseconds
    pub peer_timeout_ms: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_addr: "127.0.0.1:3001".to_string(),
            data_dir: PathBuf::from("./data"),
            authorities: Vec::new(),
            peers: Vec::new(),
            batch_threshold: 10,
            read_timeout_ms: 5000,
            peer_timeout_ms: 5000,
        }
    }
}

impl NodeConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_files_fall_back_to_defaults() {
        let config: NodeConfig =
            serde_json::from_str(r#"{ "authorities": ["V1"], "batch_threshold": 3 }"#).unwrap();
        assert_eq!(config.authorities, vec!["V1".to_string()]);
        assert_eq!(config.batch_threshold, 3);
        assert_eq!(config.rpc_addr, "127.0.0.1:3001");
    }
}
