//! Vote signing, as performed client-side by a wallet
//!
//! The node itself never signs votes; this mirrors the wallet's signing
//! scheme so integration tests and tooling can produce valid transactions.

use crate::crypto::{address_from_key, personal_message_hash};
use crate::types::{canonical_vote_payload, Transaction};
use k256::ecdsa::SigningKey;

/// Sign a vote the way a wallet does and assemble the transaction.
pub fn sign_vote(key: &SigningKey, election_id: &str, vote_data: &str) -> Transaction {
    let payload = canonical_vote_payload(election_id, vote_data);
    let digest = personal_message_hash(&payload);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .expect("signing a 32-byte prehash cannot fail");

    let mut raw = [0u8; 65];
    raw[..64].copy_from_slice(&signature.to_bytes());
    raw[64] = recovery_id.to_byte() + 27;

    Transaction {
        voter_address: address_from_key(key.verifying_key()),
        election_id: election_id.to_string(),
        vote_data: vote_data.to_string(),
        signature: format!("0x{}", hex::encode(raw)),
    }
}
