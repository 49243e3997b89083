use vote_ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum ReplicationError {
    #[error("peer request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("peer chain rejected at block {index}: {reason}")]
    ChainRejected { index: u64, reason: String },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
