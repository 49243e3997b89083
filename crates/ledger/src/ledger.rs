//! The ledger: chain state, pending pool, block creation
//!
//! One `Ledger` instance owns the chain height, the block storage handle,
//! and the pending-transaction buffer for a process. Block creation runs
//! under a binary in-process guard: at most one sealing attempt at a time,
//! and callers racing to trigger one simply keep filling the next pool.
//! Submission is never blocked by an in-flight creation.
//!
//! Blocks are content-addressed: the block bytes live under
//! `content/{cid}` and the chain order is the persisted `chain/{index}`
//! mapping to that content id, so index lookups survive restarts. Claiming
//! a chain index is a compare-and-swap; a second writer sharing the store
//! surfaces as a conflict instead of overwriting.

use crate::error::LedgerError;
use crate::gate::TransactionGate;
use crate::store::Store;
use parking_lot::Mutex;
use poa_consensus::crypto::keccak256;
use poa_consensus::{verify_block, Block, Transaction, ValidatorAuthority};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

fn chain_key(index: u64) -> String {
    format!("chain/{:010}", index)
}

fn content_key(cid: &str) -> String {
    format!("content/{}", cid)
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_millis() as u64
}

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Pending transactions needed to trigger block creation.
    pub batch_threshold: usize,
    /// Upper bound on whole-chain reads before `StorageTimeout`.
    pub read_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            batch_threshold: 10,
            read_timeout: Duration::from_secs(5),
        }
    }
}

/// Emitted on the in-process bus after a block lands, locally created or
/// accepted from a peer. `content_ref` retrieves the block bytes from the
/// content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEvent {
    pub index: u64,
    pub content_ref: String,
    pub hash: String,
}

/// A block together with the full chain, letting an external verifier
/// recompute every hash and link to confirm the block's position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditProof {
    pub block: Block,
    pub chain: Vec<Block>,
}

/// One ledger row, as served by the election-filtered view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub voter: String,
    pub choice: String,
    pub block_index: u64,
    pub block_hash: String,
}

pub struct Ledger {
    store: Arc<dyn Store>,
    authority: ValidatorAuthority,
    gate: TransactionGate,
    config: LedgerConfig,
    height: AtomicU64,
    pending: Mutex<Vec<Transaction>>,
    /// Block-creation guard. Binary, not a queue: `try_lock` losers skip.
    creating: tokio::sync::Mutex<()>,
    events: broadcast::Sender<BlockEvent>,
}

impl Ledger {
    /// Open the ledger over a store: recover height from the persisted
    /// chain index and create the genesis block if no block 0 exists.
    pub async fn open(
        store: Arc<dyn Store>,
        authority: ValidatorAuthority,
        config: LedgerConfig,
    ) -> Result<Self, LedgerError> {
        if authority.is_empty() {
            return Err(poa_consensus::ConsensusError::NoAuthorities.into());
        }

        let gate = TransactionGate::new(store.clone());
        let (events, _) = broadcast::channel(64);
        let ledger = Self {
            store,
            authority,
            gate,
            config,
            height: AtomicU64::new(0),
            pending: Mutex::new(Vec::new()),
            creating: tokio::sync::Mutex::new(()),
            events,
        };

        let recovered = ledger.recover_height().await?;
        ledger.height.store(recovered, Ordering::SeqCst);

        if recovered == 0 {
            let genesis = Block::genesis();
            match ledger.persist_block(&genesis).await {
                Ok(_) => {
                    ledger.height.store(1, Ordering::SeqCst);
                    tracing::info!(hash = %genesis.hash, "created genesis block");
                }
                Err(LedgerError::IndexOccupied { .. }) => {
                    // Another instance sharing the store won the race.
                    ledger.height.store(1, Ordering::SeqCst);
                }
                Err(err) => return Err(err),
            }
        } else {
            tracing::info!(height = recovered, "recovered chain from store");
        }

        Ok(ledger)
    }

    /// Count contiguous chain keys from index 0. A gap ends the chain; keys
    /// beyond it are unreachable and ignored.
    async fn recover_height(&self) -> Result<u64, LedgerError> {
        let keys = self.store.list_prefix("chain/").await?;
        let mut height = 0u64;
        for key in keys {
            if key == chain_key(height) {
                height += 1;
            } else {
                tracing::warn!(%key, height, "gap in persisted chain index");
                break;
            }
        }
        Ok(height)
    }

    pub fn gate(&self) -> &TransactionGate {
        &self.gate
    }

    pub fn batch_threshold(&self) -> usize {
        self.config.batch_threshold
    }

    pub fn chain_height(&self) -> u64 {
        self.height.load(Ordering::SeqCst)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Subscribe to new-block events from this instance.
    pub fn subscribe(&self) -> broadcast::Receiver<BlockEvent> {
        self.events.subscribe()
    }

    /// Admit a transaction into the pending pool; seal a block in the same
    /// call when the pool reaches the batch threshold and no creation is
    /// already in flight. Returns once the vote is durably registered as
    /// pending (or embedded).
    pub async fn submit_transaction(&self, tx: Transaction) -> Result<(), LedgerError> {
        self.gate.admit(&tx).await?;
        tracing::info!(voter = %tx.voter_address, election = %tx.election_id, "vote accepted");

        let pending_len = {
            let mut pool = self.pending.lock();
            pool.push(tx);
            pool.len()
        };

        if pending_len >= self.config.batch_threshold {
            // A sealing failure keeps the batch pending (restored by
            // create_block); the submission itself has succeeded.
            if let Err(err) = self.create_block().await {
                tracing::error!(%err, "block creation failed; batch restored to pool");
            }
        }
        Ok(())
    }

    /// Peer delivery of a transaction. Idempotent: a vote this instance
    /// already knows is quietly ignored.
    pub async fn receive_transaction(&self, tx: Transaction) -> Result<bool, LedgerError> {
        match self.submit_transaction(tx).await {
            Ok(()) => Ok(true),
            Err(LedgerError::DuplicateVote { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Detach the pending pool and seal it into the next block.
    ///
    /// Returns `Ok(None)` when another creation is in flight or the pool is
    /// empty. On failure the detached batch goes back to the front of the
    /// pool, ahead of votes that arrived meanwhile, so a later attempt
    /// embeds it in the original order.
    pub async fn create_block(&self) -> Result<Option<Block>, LedgerError> {
        let Ok(_guard) = self.creating.try_lock() else {
            tracing::debug!("block creation already in flight");
            return Ok(None);
        };

        let batch: Vec<Transaction> = std::mem::take(&mut *self.pending.lock());
        if batch.is_empty() {
            return Ok(None);
        }

        match self.seal_batch(batch.clone()).await {
            Ok(block) => Ok(Some(block)),
            Err(err) => {
                let mut pool = self.pending.lock();
                let newer = std::mem::take(&mut *pool);
                *pool = batch;
                pool.extend(newer);
                Err(err)
            }
        }
    }

    async fn seal_batch(&self, batch: Vec<Transaction>) -> Result<Block, LedgerError> {
        let new_index = self.chain_height();
        let previous = self
            .block_at(new_index - 1)
            .await?
            .ok_or_else(|| LedgerError::CorruptBlock {
                index: new_index - 1,
                reason: "chain tip missing from store".to_string(),
            })?;

        let validator = self.authority.choose_validator(new_index)?.to_string();
        let tx_count = batch.len();
        let block = Block::new(new_index, now_millis(), batch, previous.hash.clone(), validator);

        // Defensive: never persist a block the replication rule would reject.
        verify_block(&block, Some(&previous), &self.authority)?;

        let content_ref = self.persist_block(&block).await?;
        self.height.store(new_index + 1, Ordering::SeqCst);
        tracing::info!(
            index = block.index,
            validator = %block.validator,
            transactions = tx_count,
            %content_ref,
            "block created"
        );
        self.announce(&block, content_ref);
        Ok(block)
    }

    /// Accept a block from a peer or the notification path.
    ///
    /// Idempotent for blocks this instance already has; a differing block at
    /// an occupied index is a conflict, never an overwrite. A block ahead of
    /// the local height is refused so the caller can catch up in order.
    /// Returns true when the chain advanced.
    pub async fn receive_block(&self, block: Block) -> Result<bool, LedgerError> {
        let height = self.chain_height();

        if block.index < height {
            let known = self
                .block_at(block.index)
                .await?
                .ok_or_else(|| LedgerError::CorruptBlock {
                    index: block.index,
                    reason: "indexed block missing from store".to_string(),
                })?;
            if known.hash == block.hash {
                tracing::debug!(index = block.index, "ignoring block we already have");
                return Ok(false);
            }
            return Err(LedgerError::IndexOccupied { index: block.index });
        }

        if block.index > height {
            return Err(LedgerError::AheadOfChain {
                index: block.index,
                height,
            });
        }

        let previous = if height == 0 {
            None
        } else {
            Some(self.block_at(height - 1).await?.ok_or_else(|| {
                LedgerError::CorruptBlock {
                    index: height - 1,
                    reason: "chain tip missing from store".to_string(),
                }
            })?)
        };
        verify_block(&block, previous.as_ref(), &self.authority)?;

        let content_ref = self.persist_block(&block).await?;
        self.height.store(block.index + 1, Ordering::SeqCst);

        // Keep the voted registry in step with replicated blocks so local
        // duplicate checks hold for voters who voted elsewhere.
        for tx in &block.transactions {
            if let Err(err) = self
                .gate
                .registry()
                .register(&tx.election_id, &tx.voter_address)
                .await
            {
                tracing::warn!(%err, voter = %tx.voter_address, "failed to backfill voted registry");
            }
        }

        tracing::info!(index = block.index, hash = %block.hash, "accepted replicated block");
        self.announce(&block, content_ref);
        Ok(true)
    }

    fn announce(&self, block: &Block, content_ref: String) {
        // No subscribers is fine; replication may not be running.
        let _ = self.events.send(BlockEvent {
            index: block.index,
            content_ref,
            hash: block.hash.clone(),
        });
    }

    /// Store block bytes content-addressed, then claim the chain index with
    /// a compare-and-swap. Losing the swap means another writer owns the
    /// index; the orphaned content entry is harmless.
    async fn persist_block(&self, block: &Block) -> Result<String, LedgerError> {
        let bytes = serde_json::to_vec(block).expect("block serialization cannot fail");
        let cid = hex::encode(keccak256(&bytes));
        self.store.put(&content_key(&cid), &bytes).await?;

        if !self
            .store
            .put_if_absent(&chain_key(block.index), cid.as_bytes())
            .await?
        {
            return Err(LedgerError::IndexOccupied { index: block.index });
        }
        Ok(cid)
    }

    /// Read one block through the persisted index → content mapping.
    pub async fn block_at(&self, index: u64) -> Result<Option<Block>, LedgerError> {
        let Some(cid_bytes) = self.store.get(&chain_key(index)).await? else {
            return Ok(None);
        };
        let cid = String::from_utf8(cid_bytes).map_err(|_| LedgerError::CorruptBlock {
            index,
            reason: "content reference is not utf-8".to_string(),
        })?;
        let bytes = self
            .store
            .get(&content_key(&cid))
            .await?
            .ok_or_else(|| LedgerError::CorruptBlock {
                index,
                reason: format!("content {} missing", cid),
            })?;
        let block = serde_json::from_slice(&bytes).map_err(|err| LedgerError::CorruptBlock {
            index,
            reason: err.to_string(),
        })?;
        Ok(Some(block))
    }

    pub async fn latest_block(&self) -> Result<Option<Block>, LedgerError> {
        let height = self.chain_height();
        if height == 0 {
            return Ok(None);
        }
        self.block_at(height - 1).await
    }

    /// Every block 0..height-1, in order, bounded by the read timeout.
    pub async fn full_chain(&self) -> Result<Vec<Block>, LedgerError> {
        let timeout = self.config.read_timeout;
        tokio::time::timeout(timeout, self.read_chain())
            .await
            .map_err(|_| LedgerError::StorageTimeout(timeout))?
    }

    async fn read_chain(&self) -> Result<Vec<Block>, LedgerError> {
        let height = self.chain_height();
        let mut chain = Vec::with_capacity(height as usize);
        for index in 0..height {
            let block = self
                .block_at(index)
                .await?
                .ok_or_else(|| LedgerError::CorruptBlock {
                    index,
                    reason: "indexed block missing from store".to_string(),
                })?;
            chain.push(block);
        }
        Ok(chain)
    }

    /// The requested block plus the full chain. The index is re-validated
    /// against the current height at call time; blocks are returned as
    /// stored, leaving tampering for the verifier to expose.
    pub async fn audit_proof(&self, index: u64) -> Result<AuditProof, LedgerError> {
        let height = self.chain_height();
        if index >= height {
            return Err(LedgerError::InvalidIndex { index, height });
        }
        let chain = self.full_chain().await?;
        let block = chain
            .get(index as usize)
            .cloned()
            .ok_or_else(|| LedgerError::CorruptBlock {
                index,
                reason: "indexed block missing from store".to_string(),
            })?;
        Ok(AuditProof { block, chain })
    }

    /// Flattened ledger rows for one election.
    pub async fn entries_for_election(
        &self,
        election_id: &str,
    ) -> Result<Vec<LedgerEntry>, LedgerError> {
        let chain = self.full_chain().await?;
        Ok(chain
            .iter()
            .flat_map(|block| {
                block
                    .transactions
                    .iter()
                    .filter(|tx| tx.election_id == election_id)
                    .map(|tx| LedgerEntry {
                        voter: tx.voter_address.clone(),
                        choice: tx.vote_data.clone(),
                        block_index: block.index,
                        block_hash: block.hash.clone(),
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use k256::ecdsa::SigningKey;
    use poa_consensus::wallet;

    const ELECTION: &str = "council-2026";

    async fn ledger_with(store: Arc<MemoryStore>, threshold: usize) -> Ledger {
        let authority = ValidatorAuthority::new(vec!["V1".to_string(), "V2".to_string()]);
        let config = LedgerConfig {
            batch_threshold: threshold,
            ..Default::default()
        };
        let ledger = Ledger::open(store, authority, config).await.unwrap();
        if ledger.gate().elections().get(ELECTION).await.unwrap().is_none() {
            ledger
                .gate()
                .elections()
                .create(ELECTION, "0xcreator")
                .await
                .unwrap();
        }
        ledger
    }

    async fn test_ledger(threshold: usize) -> Ledger {
        ledger_with(Arc::new(MemoryStore::new()), threshold).await
    }

    fn vote(choice: &str) -> Transaction {
        let key = SigningKey::random(&mut rand::thread_rng());
        wallet::sign_vote(&key, ELECTION, choice)
    }

    #[tokio::test]
    async fn opens_with_a_genesis_block() {
        let ledger = test_ledger(10).await;
        assert_eq!(ledger.chain_height(), 1);
        let genesis = ledger.latest_block().await.unwrap().unwrap();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.validator, "genesis");
    }

    #[tokio::test]
    async fn empty_authority_set_is_fatal_at_open() {
        let result = Ledger::open(
            Arc::new(MemoryStore::new()),
            ValidatorAuthority::new(Vec::new()),
            LedgerConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    // With threshold 2 and authorities [V1, V2], the second vote seals
    // block 1, validated by V2 (rotation over the block's final index),
    // with votes embedded in submission order.
    #[tokio::test]
    async fn two_votes_seal_block_one_with_the_rotated_validator() {
        let ledger = test_ledger(2).await;
        let tx1 = vote("option-a");
        let tx2 = vote("option-b");

        ledger.submit_transaction(tx1.clone()).await.unwrap();
        assert_eq!(ledger.chain_height(), 1);
        ledger.submit_transaction(tx2.clone()).await.unwrap();

        assert_eq!(ledger.chain_height(), 2);
        assert_eq!(ledger.pending_len(), 0);

        let block = ledger.latest_block().await.unwrap().unwrap();
        assert_eq!(block.index, 1);
        assert_eq!(block.validator, "V2");
        assert_eq!(block.transactions, vec![tx1, tx2]);
    }

    #[tokio::test]
    async fn duplicate_vote_is_rejected_and_chain_unchanged() {
        let ledger = test_ledger(2).await;
        let tx = vote("option-a");
        ledger.submit_transaction(tx.clone()).await.unwrap();

        let err = ledger.submit_transaction(tx).await.unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateVote { .. }));
        assert_eq!(ledger.chain_height(), 1);
        assert_eq!(ledger.pending_len(), 1);
    }

    #[tokio::test]
    async fn batch_trigger_is_exact_and_the_next_pool_starts_fresh() {
        let ledger = test_ledger(3).await;
        for choice in ["a", "b", "c"] {
            ledger.submit_transaction(vote(choice)).await.unwrap();
        }
        assert_eq!(ledger.chain_height(), 2);
        assert_eq!(ledger.pending_len(), 0);

        ledger.submit_transaction(vote("d")).await.unwrap();
        assert_eq!(ledger.chain_height(), 2);
        assert_eq!(ledger.pending_len(), 1);
    }

    #[tokio::test]
    async fn produced_chains_link_and_rehash() {
        let ledger = test_ledger(1).await;
        for choice in ["a", "b", "c", "d"] {
            ledger.submit_transaction(vote(choice)).await.unwrap();
        }
        let chain = ledger.full_chain().await.unwrap();
        assert_eq!(chain.len(), 5);
        for i in 1..chain.len() {
            assert_eq!(chain[i].previous_hash, chain[i - 1].hash);
            assert_eq!(chain[i].hash, chain[i].compute_hash());
        }
    }

    #[tokio::test]
    async fn audit_proof_bounds_and_round_trip() {
        let ledger = test_ledger(1).await;
        ledger.submit_transaction(vote("a")).await.unwrap();

        let proof = ledger.audit_proof(1).await.unwrap();
        assert_eq!(proof.block, proof.chain[1]);

        let err = ledger.audit_proof(ledger.chain_height()).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidIndex { index: 2, height: 2 }));
    }

    // A tampered stored block is still served by audit_proof; the
    // verifier's recomputation is what exposes it.
    #[tokio::test]
    async fn tampered_stored_block_is_detectable_by_recomputation() {
        let store = Arc::new(MemoryStore::new());
        let ledger = ledger_with(store.clone(), 1).await;
        ledger.submit_transaction(vote("a")).await.unwrap();

        // Rewrite block 1's stored content with a mutated transaction list,
        // leaving the recorded hash untouched.
        let cid_bytes = store.get(&chain_key(1)).await.unwrap().unwrap();
        let cid = String::from_utf8(cid_bytes).unwrap();
        let mut tampered: Block =
            serde_json::from_slice(&store.get(&content_key(&cid)).await.unwrap().unwrap()).unwrap();
        tampered.transactions[0].vote_data = "rigged".to_string();
        store
            .put(&content_key(&cid), &serde_json::to_vec(&tampered).unwrap())
            .await
            .unwrap();

        let proof = ledger.audit_proof(1).await.unwrap();
        assert_eq!(proof.block.transactions[0].vote_data, "rigged");
        assert_ne!(proof.block.hash, proof.block.compute_hash());
    }

    #[tokio::test]
    async fn receiving_a_known_block_twice_changes_nothing() {
        let ledger = test_ledger(1).await;
        ledger.submit_transaction(vote("a")).await.unwrap();
        let block = ledger.latest_block().await.unwrap().unwrap();

        let appended = ledger.receive_block(block).await.unwrap();
        assert!(!appended);
        assert_eq!(ledger.chain_height(), 2);
    }

    #[tokio::test]
    async fn a_block_ahead_of_the_chain_is_refused() {
        let ledger = test_ledger(10).await;
        let orphan = Block::new(5, now_millis(), Vec::new(), "0xfeed".into(), "V2".into());
        let err = ledger.receive_block(orphan).await.unwrap_err();
        assert!(matches!(err, LedgerError::AheadOfChain { index: 5, height: 1 }));
    }

    #[tokio::test]
    async fn replicated_votes_backfill_the_duplicate_registry() {
        let source = test_ledger(1).await;
        let tx = vote("a");
        source.submit_transaction(tx.clone()).await.unwrap();
        let block = source.latest_block().await.unwrap().unwrap();

        let replica = test_ledger(10).await;
        replica.receive_block(block).await.unwrap();

        let err = replica.submit_transaction(tx).await.unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateVote { .. }));
    }

    // Two processes sharing one backing store racing for the same index:
    // the loser gets a conflict, never an overwrite.
    #[tokio::test]
    async fn second_writer_on_a_shared_store_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let a = ledger_with(store.clone(), 10).await;
        let b = ledger_with(store.clone(), 10).await;

        a.submit_transaction(vote("a")).await.unwrap();
        a.create_block().await.unwrap();

        // b still believes height is 1 and tries to claim index 1.
        b.submit_transaction(vote("b")).await.unwrap();
        let err = b.create_block().await.unwrap_err();
        assert!(matches!(err, LedgerError::IndexOccupied { index: 1 }));
        assert_eq!(b.pending_len(), 1, "losing batch is restored");
    }

    #[tokio::test]
    async fn failed_creation_restores_the_batch_in_order() {
        let store = Arc::new(MemoryStore::new());
        let ledger = ledger_with(store.clone(), 10).await;
        let tx1 = vote("a");
        let tx2 = vote("b");
        ledger.submit_transaction(tx1.clone()).await.unwrap();
        ledger.submit_transaction(tx2.clone()).await.unwrap();

        store.set_fail_writes(true);
        assert!(ledger.create_block().await.is_err());
        assert_eq!(ledger.chain_height(), 1);
        assert_eq!(ledger.pending_len(), 2);

        store.set_fail_writes(false);
        let block = ledger.create_block().await.unwrap().unwrap();
        assert_eq!(block.transactions, vec![tx1, tx2]);
        assert_eq!(ledger.chain_height(), 2);
    }

    #[tokio::test]
    async fn slow_storage_surfaces_as_a_timeout() {
        let store = Arc::new(MemoryStore::new());
        let authority = ValidatorAuthority::new(vec!["V1".to_string()]);
        let config = LedgerConfig {
            batch_threshold: 10,
            read_timeout: Duration::from_millis(20),
        };
        let ledger = Ledger::open(store.clone(), authority, config).await.unwrap();

        store.set_read_delay(Some(Duration::from_millis(100)));
        let err = ledger.full_chain().await.unwrap_err();
        assert!(matches!(err, LedgerError::StorageTimeout(_)));
    }

    #[tokio::test]
    async fn height_is_recovered_from_the_store_on_reopen() {
        let store = Arc::new(MemoryStore::new());
        {
            let ledger = ledger_with(store.clone(), 1).await;
            ledger.submit_transaction(vote("a")).await.unwrap();
            ledger.submit_transaction(vote("b")).await.unwrap();
            assert_eq!(ledger.chain_height(), 3);
        }
        let reopened = ledger_with(store, 10).await;
        assert_eq!(reopened.chain_height(), 3);
        let tip = reopened.latest_block().await.unwrap().unwrap();
        assert_eq!(tip.index, 2);
    }

    #[tokio::test]
    async fn election_filtered_entries_preserve_order() {
        let ledger = test_ledger(1).await;
        ledger
            .gate()
            .elections()
            .create("other", "0xcreator")
            .await
            .unwrap();

        let tx1 = vote("yes");
        ledger.submit_transaction(tx1.clone()).await.unwrap();
        let key = SigningKey::random(&mut rand::thread_rng());
        ledger
            .submit_transaction(wallet::sign_vote(&key, "other", "no"))
            .await
            .unwrap();
        let tx2 = vote("no");
        ledger.submit_transaction(tx2.clone()).await.unwrap();

        let entries = ledger.entries_for_election(ELECTION).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].voter, tx1.voter_address);
        assert_eq!(entries[0].choice, "yes");
        assert_eq!(entries[1].voter, tx2.voter_address);
        assert_eq!(entries[1].block_index, 3);
    }
}
