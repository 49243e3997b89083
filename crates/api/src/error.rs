//! HTTP status mapping for ledger errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use vote_ledger::LedgerError;

pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err)
    }
}

fn status_for(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::InvalidSignature => StatusCode::BAD_REQUEST,
        LedgerError::DuplicateVote { .. } => StatusCode::CONFLICT,
        LedgerError::UnknownElection(_) => StatusCode::NOT_FOUND,
        LedgerError::ElectionClosed(_) => StatusCode::CONFLICT,
        LedgerError::ElectionExists(_) => StatusCode::CONFLICT,
        LedgerError::NotElectionCreator => StatusCode::FORBIDDEN,
        LedgerError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::InvalidIndex { .. } => StatusCode::NOT_FOUND,
        LedgerError::AheadOfChain { .. } => StatusCode::CONFLICT,
        LedgerError::IndexOccupied { .. } => StatusCode::CONFLICT,
        LedgerError::StorageTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        LedgerError::Config(_)
        | LedgerError::CorruptBlock { .. }
        | LedgerError::CorruptElection { .. }
        | LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
