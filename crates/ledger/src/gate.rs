//! Transaction admission control
//!
//! Fixed check order, relied on by callers for error precedence:
//! election gate, then duplicate membership, then signature, then the
//! atomic check-and-register. The registry compare-and-swap, not the
//! earlier membership read, is what makes two racing submissions for the
//! same voter impossible to both admit.

use crate::elections::Elections;
use crate::error::LedgerError;
use crate::registry::VotedRegistry;
use crate::store::Store;
use poa_consensus::crypto::verify_vote_signature;
use poa_consensus::Transaction;
use std::sync::Arc;

#[derive(Clone)]
pub struct TransactionGate {
    registry: VotedRegistry,
    elections: Elections,
}

impl TransactionGate {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            registry: VotedRegistry::new(store.clone()),
            elections: Elections::new(store),
        }
    }

    pub fn registry(&self) -> &VotedRegistry {
        &self.registry
    }

    pub fn elections(&self) -> &Elections {
        &self.elections
    }

    /// Validate and register one transaction. Terminal on failure: the
    /// transaction is reported to the caller and never retried.
    pub async fn admit(&self, tx: &Transaction) -> Result<(), LedgerError> {
        self.elections.require_open(&tx.election_id).await?;

        let duplicate = LedgerError::DuplicateVote {
            election_id: tx.election_id.clone(),
            voter: tx.voter_address.clone(),
        };
        if self
            .registry
            .is_registered(&tx.election_id, &tx.voter_address)
            .await?
        {
            return Err(duplicate);
        }

        if !verify_vote_signature(tx) {
            return Err(LedgerError::InvalidSignature);
        }

        if !self
            .registry
            .register(&tx.election_id, &tx.voter_address)
            .await?
        {
            // Lost the race to a concurrent submission for the same voter.
            return Err(duplicate);
        }
        Ok(())
    }
}
