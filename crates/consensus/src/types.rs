//! Canonical ledger types
//!
//! The JSON field order of these structs is load-bearing: it is the canonical
//! form hashed into block digests and signed by wallets, so every node (and
//! the browser wallet) must serialize identically. Do not reorder fields.

use crate::crypto::keccak256_hex;
use serde::{Deserialize, Serialize};

/// Previous-hash sentinel carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Validator identity sentinel carried by the genesis block.
pub const GENESIS_VALIDATOR: &str = "genesis";

/// A signed vote. Immutable once embedded in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// 0x-prefixed 20-byte address of the voter, recovered from `signature`.
    pub voter_address: String,
    pub election_id: String,
    /// Opaque vote payload; the ledger never interprets it.
    pub vote_data: String,
    /// 0x-prefixed 65-byte recoverable secp256k1 signature (r || s || v).
    pub signature: String,
}

/// The message a wallet signs: `{"electionId":…,"voteData":…}` with exactly
/// that field order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VotePayload<'a> {
    election_id: &'a str,
    vote_data: &'a str,
}

impl Transaction {
    /// The canonical signing payload for this vote.
    pub fn canonical_payload(&self) -> String {
        canonical_vote_payload(&self.election_id, &self.vote_data)
    }

    /// Registry key for duplicate-vote detection: one vote per
    /// `(election, voter)` pair, voter compared case-insensitively.
    pub fn voter_key(&self) -> String {
        format!("{}:{}", self.election_id, self.voter_address.to_lowercase())
    }
}

/// Canonical signing payload shared by signers and verifiers.
pub fn canonical_vote_payload(election_id: &str, vote_data: &str) -> String {
    serde_json::to_string(&VotePayload {
        election_id,
        vote_data,
    })
    .expect("vote payload serialization cannot fail")
}

/// One immutable, hash-linked ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    /// Creation time, unix milliseconds.
    pub timestamp: u64,
    /// Insertion order is preserved and hashed; never reorder.
    pub transactions: Vec<Transaction>,
    pub previous_hash: String,
    pub validator: String,
    pub hash: String,
}

impl Block {
    /// Build a block and seal it with its content hash.
    pub fn new(
        index: u64,
        timestamp: u64,
        transactions: Vec<Transaction>,
        previous_hash: String,
        validator: String,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp,
            transactions,
            previous_hash,
            validator,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// The fixed first block of the chain. Deterministic, timestamp zero
    /// included, so every instance starts from the same hash and their
    /// chains can link.
    pub fn genesis() -> Self {
        Self::new(
            0,
            0,
            Vec::new(),
            GENESIS_PREVIOUS_HASH.to_string(),
            GENESIS_VALIDATOR.to_string(),
        )
    }

    /// Recompute the content hash from the other five fields. Pure; used at
    /// construction and at every verification. A stored hash is never
    /// trusted without recomputation.
    pub fn compute_hash(&self) -> String {
        let transactions = serde_json::to_string(&self.transactions)
            .expect("transaction list serialization cannot fail");
        let preimage = format!(
            "{}{}{}{}{}",
            self.index, self.timestamp, transactions, self.previous_hash, self.validator
        );
        keccak256_hex(preimage.as_bytes())
    }
}
