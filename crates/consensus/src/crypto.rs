//! Keccak-256 hashing and secp256k1 signer recovery
//!
//! Votes are signed by browser wallets with the Ethereum personal-message
//! scheme: the canonical payload is prefixed with
//! `"\x19Ethereum Signed Message:\n" + len` before hashing, and the 65-byte
//! recoverable signature yields the signer's address without any key
//! registry. Recovery is deterministic and pure.

use crate::error::SignatureError;
use crate::types::Transaction;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Keccak-256 digest of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 digest rendered as a 0x-prefixed hex string.
pub fn keccak256_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(keccak256(data)))
}

/// Digest actually signed by wallets for `message`.
pub fn personal_message_hash(message: &str) -> [u8; 32] {
    let prefixed = format!("{}{}{}", PERSONAL_MESSAGE_PREFIX, message.len(), message);
    keccak256(prefixed.as_bytes())
}

/// Recover the 0x-prefixed signer address of `message` from a 65-byte
/// recoverable signature in hex.
pub fn recover_signer(message: &str, signature_hex: &str) -> Result<String, SignatureError> {
    let raw = hex::decode(signature_hex.trim_start_matches("0x"))
        .map_err(|_| SignatureError::InvalidFormat)?;
    if raw.len() != 65 {
        return Err(SignatureError::InvalidFormat);
    }

    let recovery_id = parse_recovery_id(raw[64])?;
    let signature =
        Signature::from_slice(&raw[..64]).map_err(|_| SignatureError::InvalidFormat)?;

    let digest = personal_message_hash(message);
    let verifying_key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    Ok(address_from_key(&verifying_key))
}

/// True iff the transaction's signature over its canonical payload recovers
/// to the claimed voter address. Pure, no state.
pub fn verify_vote_signature(tx: &Transaction) -> bool {
    match recover_signer(&tx.canonical_payload(), &tx.signature) {
        Ok(signer) => signer.eq_ignore_ascii_case(&tx.voter_address),
        Err(err) => {
            tracing::debug!(voter = %tx.voter_address, %err, "signature recovery failed");
            false
        }
    }
}

/// Ethereum-style address: last 20 bytes of the keccak of the uncompressed
/// public key (without the 0x04 tag).
pub fn address_from_key(key: &VerifyingKey) -> String {
    let encoded = key.to_encoded_point(false);
    let digest = keccak256(&encoded.as_bytes()[1..]);
    format!("0x{}", hex::encode(&digest[12..]))
}

/// Accepts both raw (0/1) and Ethereum-offset (27/28) recovery ids.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        other => return Err(SignatureError::InvalidRecoveryId(other)),
    };
    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}
