//! Replication between ledger instances
//!
//! Replication is best effort by design: the chain's correctness never
//! depends on a peer being reachable. An instance bootstraps from whatever
//! peers answer, pushes what it produces to whoever listens, and otherwise
//! keeps serving its local chain.

pub mod client;
pub mod error;
pub mod manager;

pub use client::{ChainResponse, PeerClient};
pub use error::ReplicationError;
pub use manager::ReplicationManager;
