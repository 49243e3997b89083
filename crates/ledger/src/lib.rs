//! Vote ledger core
//!
//! Owns chain height, the persisted block sequence, and the
//! pending-transaction buffer. All block-creation side effects are
//! serialized behind an in-process guard; everything else is designed to
//! stay available while a block is being sealed.

pub mod elections;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod registry;
pub mod store;

pub use elections::{Election, ElectionStatus, Elections};
pub use error::LedgerError;
pub use gate::TransactionGate;
pub use ledger::{AuditProof, BlockEvent, Ledger, LedgerConfig, LedgerEntry};
pub use registry::VotedRegistry;
pub use store::{MemoryStore, SledStore, Store, StoreError};
