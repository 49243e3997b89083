//! The fixed, ordered authority set and its rotation rule

use crate::error::ConsensusError;

/// Ordered set of identities permitted to validate blocks.
///
/// Selection is stateless given a block index, so every node computes the
/// same expected validator without coordination.
#[derive(Debug, Clone)]
pub struct ValidatorAuthority {
    authorities: Vec<String>,
}

impl ValidatorAuthority {
    pub fn new(authorities: Vec<String>) -> Self {
        Self { authorities }
    }

    pub fn is_empty(&self) -> bool {
        self.authorities.is_empty()
    }

    /// The validator expected at `block_index`: round-robin over the set.
    ///
    /// The index passed here is the new block's final index. An empty set is
    /// a configuration error, never retried.
    pub fn choose_validator(&self, block_index: u64) -> Result<&str, ConsensusError> {
        if self.authorities.is_empty() {
            return Err(ConsensusError::NoAuthorities);
        }
        let slot = (block_index % self.authorities.len() as u64) as usize;
        Ok(&self.authorities[slot])
    }

    /// Membership test used during block validation.
    pub fn is_authorized(&self, identity: &str) -> bool {
        self.authorities.iter().any(|a| a == identity)
    }
}
