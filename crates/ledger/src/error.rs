//! Ledger error taxonomy
//!
//! Validation and configuration errors are returned synchronously to the
//! caller and never retried. Storage errors are surfaced to the caller of
//! the specific read or write that hit them; they never fail an unrelated
//! request.

use crate::store::StoreError;
use poa_consensus::{BlockRejection, ConsensusError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    // --- Validation: terminal for the offending transaction or block ---
    #[error("invalid signature")]
    InvalidSignature,
    #[error("duplicate vote for election {election_id} by {voter}")]
    DuplicateVote { election_id: String, voter: String },
    #[error("unknown election {0}")]
    UnknownElection(String),
    #[error("election {0} is closed")]
    ElectionClosed(String),
    #[error("election {0} already exists")]
    ElectionExists(String),
    #[error("only the election creator may close it")]
    NotElectionCreator,
    #[error(transparent)]
    Rejected(#[from] BlockRejection),

    // --- Configuration ---
    #[error(transparent)]
    Config(#[from] ConsensusError),

    // --- Chain shape ---
    #[error("block index {index} out of range [0, {height})")]
    InvalidIndex { index: u64, height: u64 },
    #[error("block {index} is ahead of local height {height}")]
    AheadOfChain { index: u64, height: u64 },
    #[error("a different block already occupies index {index}")]
    IndexOccupied { index: u64 },
    #[error("stored block {index} is unreadable: {reason}")]
    CorruptBlock { index: u64, reason: String },
    #[error("stored election record {id} is unreadable: {reason}")]
    CorruptElection { id: String, reason: String },

    // --- Storage ---
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("storage did not respond within {0:?}")]
    StorageTimeout(Duration),
}
