//! Election bookkeeping, reduced to the single gate it imposes on votes
//!
//! An election is an identifier, its creator, and an open/closed status.
//! The core only ever consults it to admit or reject a vote; creation and
//! closure exist so that gate has something to read.

use crate::error::LedgerError;
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn election_key(id: &str) -> String {
    format!("election/{}", id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    pub id: String,
    pub creator: String,
    pub status: ElectionStatus,
}

#[derive(Clone)]
pub struct Elections {
    store: Arc<dyn Store>,
}

impl Elections {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, id: &str, creator: &str) -> Result<Election, LedgerError> {
        let election = Election {
            id: id.to_string(),
            creator: creator.to_string(),
            status: ElectionStatus::Open,
        };
        let bytes = serde_json::to_vec(&election).expect("election serialization cannot fail");
        if !self.store.put_if_absent(&election_key(id), &bytes).await? {
            return Err(LedgerError::ElectionExists(id.to_string()));
        }
        tracing::info!(election = %id, %creator, "election created");
        Ok(election)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Election>, LedgerError> {
        match self.store.get(&election_key(id)).await? {
            Some(bytes) => {
                let election = serde_json::from_slice(&bytes).map_err(|err| {
                    LedgerError::CorruptElection {
                        id: id.to_string(),
                        reason: err.to_string(),
                    }
                })?;
                Ok(Some(election))
            }
            None => Ok(None),
        }
    }

    /// The vote admission gate: the election must exist and be open.
    pub async fn require_open(&self, id: &str) -> Result<(), LedgerError> {
        match self.get(id).await? {
            None => Err(LedgerError::UnknownElection(id.to_string())),
            Some(election) if election.status == ElectionStatus::Closed => {
                Err(LedgerError::ElectionClosed(id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }

    /// Close an election. Only its creator may do so; closing twice is a
    /// no-op.
    pub async fn close(&self, id: &str, caller: &str) -> Result<(), LedgerError> {
        let mut election = self
            .get(id)
            .await?
            .ok_or_else(|| LedgerError::UnknownElection(id.to_string()))?;
        if !election.creator.eq_ignore_ascii_case(caller) {
            return Err(LedgerError::NotElectionCreator);
        }
        election.status = ElectionStatus::Closed;
        let bytes = serde_json::to_vec(&election).expect("election serialization cannot fail");
        self.store.put(&election_key(id), &bytes).await?;
        tracing::info!(election = %id, "election closed");
        Ok(())
    }
}
