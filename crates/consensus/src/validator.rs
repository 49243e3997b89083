//! Block validation shared by local creation and replication
//!
//! The same rule decides whether a locally built block may be persisted and
//! whether a block received from a peer may extend the chain.

use crate::authority::ValidatorAuthority;
use crate::error::BlockRejection;
use crate::types::{Block, GENESIS_PREVIOUS_HASH, GENESIS_VALIDATOR};

/// Decide whether `candidate` may extend the chain after `previous`.
///
/// `previous` is `None` only when the candidate claims to be the genesis
/// block itself (an empty local chain accepting a replicated chain).
/// The three checks are order-independent; the first failure found is
/// reported with its reason.
pub fn verify_block(
    candidate: &Block,
    previous: Option<&Block>,
    authority: &ValidatorAuthority,
) -> Result<(), BlockRejection> {
    match previous {
        Some(previous) => {
            if candidate.previous_hash != previous.hash {
                return Err(BlockRejection::LinkMismatch {
                    index: candidate.index,
                    expected: previous.hash.clone(),
                    got: candidate.previous_hash.clone(),
                });
            }
            if candidate.hash != candidate.compute_hash() {
                return Err(BlockRejection::HashMismatch {
                    index: candidate.index,
                });
            }
            if !authority.is_authorized(&candidate.validator) {
                return Err(BlockRejection::UnauthorizedValidator {
                    index: candidate.index,
                    validator: candidate.validator.clone(),
                });
            }
        }
        None => {
            // A well-formed genesis: sentinel link, sentinel identity,
            // hash consistent with content.
            if candidate.index != 0 || candidate.previous_hash != GENESIS_PREVIOUS_HASH {
                return Err(BlockRejection::LinkMismatch {
                    index: candidate.index,
                    expected: GENESIS_PREVIOUS_HASH.to_string(),
                    got: candidate.previous_hash.clone(),
                });
            }
            if candidate.hash != candidate.compute_hash() {
                return Err(BlockRejection::HashMismatch {
                    index: candidate.index,
                });
            }
            if candidate.validator != GENESIS_VALIDATOR {
                return Err(BlockRejection::UnauthorizedValidator {
                    index: candidate.index,
                    validator: candidate.validator.clone(),
                });
            }
        }
    }
    Ok(())
}
