//! HTTP client side of peer exchange
//!
//! Peers are plain base URLs. Every call targets one peer and maps transport
//! failures into `ReplicationError::Http`; retry and fan-out policy live in
//! the manager, not here.

use crate::error::ReplicationError;
use poa_consensus::{Block, Transaction};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vote_ledger::BlockEvent;

/// Wire form of a full-chain read, shared by the HTTP server and this client.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: u64,
}

#[derive(Clone)]
pub struct PeerClient {
    http: reqwest::Client,
}

fn peer_url(peer: &str, path: &str) -> String {
    format!("{}{}", peer.trim_end_matches('/'), path)
}

impl PeerClient {
    pub fn new(request_timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("client construction only fails on TLS backends, which this build does not enable");
        Self { http }
    }

    pub async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse, ReplicationError> {
        let response = self
            .http
            .get(peer_url(peer, "/chain"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn push_transaction(
        &self,
        peer: &str,
        tx: &Transaction,
    ) -> Result<(), ReplicationError> {
        self.http
            .post(peer_url(peer, "/peer/transaction"))
            .json(tx)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn push_block(&self, peer: &str, block: &Block) -> Result<(), ReplicationError> {
        self.http
            .post(peer_url(peer, "/peer/block"))
            .json(block)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Lightweight new-block notification; the receiver decides whether to
    /// fetch the chain.
    pub async fn notify(&self, peer: &str, event: &BlockEvent) -> Result<(), ReplicationError> {
        self.http
            .post(peer_url(peer, "/peer/notify"))
            .json(event)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
