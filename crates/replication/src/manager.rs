//! Replication manager: bootstrap, fan-out, new-block subscription
//!
//! The manager owns the peer list and a handle to the local ledger. Fan-out
//! is fire-and-forget per peer: an unreachable peer is logged and skipped,
//! never retried synchronously and never allowed to fail the caller. A
//! rebroadcast echoing back to its origin is absorbed by the ledger's
//! idempotent block acceptance.

use crate::client::PeerClient;
use crate::error::ReplicationError;
use poa_consensus::{Block, Transaction};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use vote_ledger::{Ledger, LedgerError};

pub struct ReplicationManager {
    ledger: Arc<Ledger>,
    client: PeerClient,
    peers: Vec<String>,
}

impl ReplicationManager {
    pub fn new(ledger: Arc<Ledger>, peers: Vec<String>, request_timeout: Duration) -> Self {
        Self {
            ledger,
            client: PeerClient::new(request_timeout),
            peers,
        }
    }

    pub fn has_peers(&self) -> bool {
        !self.peers.is_empty()
    }

    /// Catch up from peers at startup. Every configured peer is asked for
    /// its chain and the longest one that verifies is adopted; an instance
    /// with no reachable peer starts from its own chain. Never fatal.
    pub async fn bootstrap(&self) {
        for peer in &self.peers {
            match self.client.fetch_chain(peer).await {
                Ok(response) => match self.adopt_chain(&response.chain).await {
                    Ok(applied) if applied > 0 => {
                        tracing::info!(%peer, applied, height = self.ledger.chain_height(), "bootstrapped from peer");
                    }
                    Ok(_) => {
                        tracing::debug!(%peer, "peer chain holds nothing new");
                    }
                    Err(err) => {
                        tracing::warn!(%peer, %err, "rejecting peer chain");
                    }
                },
                Err(err) => {
                    tracing::warn!(%peer, %err, "peer unreachable during bootstrap");
                }
            }
        }
    }

    /// Apply a peer's chain on top of the local one, in order. Blocks the
    /// ledger already holds are skipped; the first block that fails
    /// verification rejects the rest of the chain. Returns how many blocks
    /// were appended.
    pub async fn adopt_chain(&self, chain: &[Block]) -> Result<u64, ReplicationError> {
        let mut applied = 0u64;
        for block in chain {
            let index = block.index;
            match self.ledger.receive_block(block.clone()).await {
                Ok(true) => applied += 1,
                Ok(false) => {}
                Err(LedgerError::Rejected(rejection)) => {
                    return Err(ReplicationError::ChainRejected {
                        index,
                        reason: rejection.to_string(),
                    });
                }
                Err(LedgerError::IndexOccupied { index }) => {
                    return Err(ReplicationError::ChainRejected {
                        index,
                        reason: "conflicts with a block this instance already holds".to_string(),
                    });
                }
                Err(LedgerError::AheadOfChain { index, height }) => {
                    return Err(ReplicationError::ChainRejected {
                        index,
                        reason: format!("gap in peer chain at local height {}", height),
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(applied)
    }

    /// Push a freshly admitted transaction to every peer so each instance
    /// can batch it locally.
    pub fn broadcast_transaction(&self, tx: Transaction) {
        for peer in self.peers.clone() {
            let client = self.client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Err(err) = client.push_transaction(&peer, &tx).await {
                    tracing::warn!(%peer, %err, "transaction broadcast failed");
                }
            });
        }
    }

    /// Push a block and its new-block notification to every peer.
    pub fn broadcast_block(&self, block: Block) {
        for peer in self.peers.clone() {
            let client = self.client.clone();
            let block = block.clone();
            tokio::spawn(async move {
                if let Err(err) = client.push_block(&peer, &block).await {
                    tracing::warn!(%peer, index = block.index, %err, "block broadcast failed");
                }
            });
        }
    }

    /// Forward the local ledger's new-block events to peers until the
    /// ledger shuts down. Run as a background task.
    pub async fn run(self: Arc<Self>) {
        let mut events = self.ledger.subscribe();
        loop {
            match events.recv().await {
                Ok(event) => {
                    let block = match self.ledger.block_at(event.index).await {
                        Ok(Some(block)) => block,
                        Ok(None) => {
                            tracing::warn!(index = event.index, "announced block missing from store");
                            continue;
                        }
                        Err(err) => {
                            tracing::error!(index = event.index, %err, "failed to load announced block");
                            continue;
                        }
                    };
                    for peer in &self.peers {
                        if let Err(err) = self.client.notify(peer, &event).await {
                            tracing::debug!(%peer, %err, "notify failed");
                        }
                    }
                    self.broadcast_block(block);
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "subscriber lagged behind block events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }
}
