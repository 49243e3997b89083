//! Proof-of-authority consensus policy
//!
//! Pure, deterministic pieces of the vote ledger:
//! - Canonical transaction and block types with keccak-256 hash chaining
//! - Signer recovery for wallet-signed votes (secp256k1)
//! - Round-robin validator rotation over a fixed authority set
//! - Block validation shared by local creation and replication

pub mod authority;
pub mod crypto;
pub mod error;
pub mod types;
pub mod validator;
pub mod wallet;

pub use authority::ValidatorAuthority;
pub use error::{BlockRejection, ConsensusError, SignatureError};
pub use types::{Block, Transaction, GENESIS_PREVIOUS_HASH, GENESIS_VALIDATOR};
pub use validator::verify_block;
