//! Consensus error types

use thiserror::Error;

/// Configuration-level failures. Not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    /// The authority set is empty; no validator can ever be chosen.
    #[error("no authority keys configured")]
    NoAuthorities,
}

/// Why a candidate block may not extend the chain.
///
/// All three checks are mandatory; any one of them rejects the block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockRejection {
    #[error("block {index}: previous hash {got} does not match chain tip {expected}")]
    LinkMismatch {
        index: u64,
        expected: String,
        got: String,
    },
    #[error("block {index}: stored hash does not match recomputed content hash")]
    HashMismatch { index: u64 },
    #[error("block {index}: validator {validator} is not in the authority set")]
    UnauthorizedValidator { index: u64, validator: String },
}

/// Failures while parsing or recovering a vote signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature is not 65 bytes of hex")]
    InvalidFormat,
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),
    #[error("public key recovery failed")]
    RecoveryFailed,
}
