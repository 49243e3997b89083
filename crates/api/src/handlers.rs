//! Route handlers
//!
//! Handlers stay thin: parse, call the ledger, map the result. Broadcast to
//! peers happens only on the public routes; the `/peer` routes never
//! rebroadcast what a peer just sent us.

use crate::error::ApiError;
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use poa_consensus::{Block, Transaction};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use vote_ledger::{AuditProof, BlockEvent, Election, LedgerEntry};
use vote_replication::ChainResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditProofQuery {
    pub block_index: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionLedgerQuery {
    pub election_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateElectionRequest {
    pub id: String,
    pub creator: String,
}

#[derive(Debug, Deserialize)]
pub struct CloseElectionRequest {
    pub caller: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteAccepted {
    pub status: &'static str,
    pub pending_transactions: usize,
    pub chain_height: u64,
}

/// Public vote submission. An accepted vote is forwarded to peers so every
/// instance can batch it.
pub async fn cast_vote(
    State(state): State<AppState>,
    Json(tx): Json<Transaction>,
) -> Result<Json<VoteAccepted>, ApiError> {
    state.ledger.submit_transaction(tx.clone()).await?;
    state.replication.broadcast_transaction(tx);
    Ok(Json(VoteAccepted {
        status: "accepted",
        pending_transactions: state.ledger.pending_len(),
        chain_height: state.ledger.chain_height(),
    }))
}

pub async fn get_chain(State(state): State<AppState>) -> Result<Json<ChainResponse>, ApiError> {
    let chain = state.ledger.full_chain().await?;
    let length = chain.len() as u64;
    Ok(Json(ChainResponse { chain, length }))
}

pub async fn get_audit_proof(
    State(state): State<AppState>,
    Query(query): Query<AuditProofQuery>,
) -> Result<Json<AuditProof>, ApiError> {
    Ok(Json(state.ledger.audit_proof(query.block_index).await?))
}

pub async fn get_election_ledger(
    State(state): State<AppState>,
    Query(query): Query<ElectionLedgerQuery>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    Ok(Json(
        state.ledger.entries_for_election(&query.election_id).await?,
    ))
}

pub async fn create_election(
    State(state): State<AppState>,
    Json(request): Json<CreateElectionRequest>,
) -> Result<Json<Election>, ApiError> {
    let election = state
        .ledger
        .gate()
        .elections()
        .create(&request.id, &request.creator)
        .await?;
    Ok(Json(election))
}

pub async fn close_election(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CloseElectionRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .ledger
        .gate()
        .elections()
        .close(&id, &request.caller)
        .await?;
    Ok(Json(json!({ "status": "closed" })))
}

/// Peer delivery of a transaction. Duplicates report as not accepted
/// instead of erroring so gossip echoes stay quiet.
pub async fn peer_transaction(
    State(state): State<AppState>,
    Json(tx): Json<Transaction>,
) -> Result<Json<Value>, ApiError> {
    let accepted = state.ledger.receive_transaction(tx).await?;
    Ok(Json(json!({ "accepted": accepted })))
}

pub async fn peer_block(
    State(state): State<AppState>,
    Json(block): Json<Block>,
) -> Result<Json<Value>, ApiError> {
    let appended = state.ledger.receive_block(block).await?;
    Ok(Json(json!({ "appended": appended })))
}

/// New-block notification. Advisory: an announcement ahead of the local
/// chain triggers a background catch-up from peers; the response never
/// waits for it.
pub async fn peer_notify(
    State(state): State<AppState>,
    Json(event): Json<BlockEvent>,
) -> Json<Value> {
    let height = state.ledger.chain_height();
    let known = event.index < height;
    if !known {
        tracing::info!(index = event.index, height, "peer announced a block ahead of us");
        let replication = state.replication.clone();
        tokio::spawn(async move { replication.bootstrap().await });
    }
    Json(json!({ "known": known }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "chainHeight": state.ledger.chain_height(),
        "pendingTransactions": state.ledger.pending_len(),
    }))
}
