//! Voted registry: one vote per (election, voter), forever
//!
//! The registry is a monotonically growing set persisted in the backing
//! store so duplicate votes stay rejected across restarts. Registration is
//! an atomic test-and-set on the store key; that single compare-and-swap is
//! the only per-key mutual exclusion the system needs.

use crate::store::{Store, StoreError};
use std::sync::Arc;

fn voted_key(election_id: &str, voter_address: &str) -> String {
    format!("voted/{}:{}", election_id, voter_address.to_lowercase())
}

#[derive(Clone)]
pub struct VotedRegistry {
    store: Arc<dyn Store>,
}

impl VotedRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn is_registered(
        &self,
        election_id: &str,
        voter_address: &str,
    ) -> Result<bool, StoreError> {
        Ok(self
            .store
            .get(&voted_key(election_id, voter_address))
            .await?
            .is_some())
    }

    /// Atomic check-and-register. Returns false if the pair was already
    /// present; exactly one of any number of concurrent callers for the
    /// same key sees true.
    pub async fn register(
        &self,
        election_id: &str,
        voter_address: &str,
    ) -> Result<bool, StoreError> {
        self.store
            .put_if_absent(&voted_key(election_id, voter_address), b"1")
            .await
    }
}
