//! HTTP server wiring
//!
//! Browser wallets call the public routes cross-origin, so CORS stays wide
//! open for GET and POST.

use crate::handlers;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use vote_ledger::Ledger;
use vote_replication::ReplicationManager;

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub replication: Arc<ReplicationManager>,
}

pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    pub fn new(ledger: Arc<Ledger>, replication: Arc<ReplicationManager>) -> Self {
        Self {
            state: AppState { ledger, replication },
        }
    }

    pub fn router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

        Router::new()
            .route("/castVote", post(handlers::cast_vote))
            .route("/chain", get(handlers::get_chain))
            .route("/auditProof", get(handlers::get_audit_proof))
            .route("/ledger", get(handlers::get_election_ledger))
            .route("/elections", post(handlers::create_election))
            .route("/elections/:id/close", post(handlers::close_election))
            .route("/peer/transaction", post(handlers::peer_transaction))
            .route("/peer/block", post(handlers::peer_block))
            .route("/peer/notify", post(handlers::peer_notify))
            .route("/health", get(handlers::health))
            .layer(cors)
            .with_state(self.state)
    }

    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server listening on {}", addr);
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use k256::ecdsa::SigningKey;
    use poa_consensus::{wallet, ValidatorAuthority};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;
    use vote_ledger::{LedgerConfig, MemoryStore};

    const ELECTION: &str = "council-2026";

    async fn test_router(threshold: usize) -> Router {
        let authority = ValidatorAuthority::new(vec!["V1".to_string(), "V2".to_string()]);
        let config = LedgerConfig {
            batch_threshold: threshold,
            ..Default::default()
        };
        let ledger = Arc::new(
            Ledger::open(Arc::new(MemoryStore::new()), authority, config)
                .await
                .unwrap(),
        );
        ledger
            .gate()
            .elections()
            .create(ELECTION, "0xcreator")
            .await
            .unwrap();
        let replication = Arc::new(ReplicationManager::new(
            ledger.clone(),
            Vec::new(),
            Duration::from_secs(1),
        ));
        HttpServer::new(ledger, replication).router()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_height_and_pending() {
        let router = test_router(10).await;
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["chainHeight"], 1);
        assert_eq!(body["pendingTransactions"], 0);
    }

    #[tokio::test]
    async fn casting_two_votes_at_threshold_two_grows_the_chain() {
        let router = test_router(2).await;

        for choice in ["option-a", "option-b"] {
            let key = SigningKey::random(&mut rand::thread_rng());
            let tx = wallet::sign_vote(&key, ELECTION, choice);
            let response = router
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/castVote",
                    serde_json::to_value(&tx).unwrap(),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .oneshot(Request::get("/chain").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["length"], 2);
        assert_eq!(body["chain"][1]["validator"], "V2");
    }

    #[tokio::test]
    async fn a_duplicate_vote_is_a_conflict() {
        let router = test_router(10).await;
        let key = SigningKey::random(&mut rand::thread_rng());
        let tx = serde_json::to_value(wallet::sign_vote(&key, ELECTION, "option-a")).unwrap();

        let first = router
            .clone()
            .oneshot(json_request("POST", "/castVote", tx.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = router
            .oneshot(json_request("POST", "/castVote", tx))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn a_forged_vote_is_a_bad_request() {
        let router = test_router(10).await;
        let key = SigningKey::random(&mut rand::thread_rng());
        let mut tx = wallet::sign_vote(&key, ELECTION, "option-a");
        tx.vote_data = "option-b".to_string();

        let response = router
            .oneshot(json_request(
                "POST",
                "/castVote",
                serde_json::to_value(&tx).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn audit_proof_out_of_range_is_not_found() {
        let router = test_router(10).await;
        let response = router
            .oneshot(
                Request::get("/auditProof?blockIndex=7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn election_lifecycle_over_http() {
        let router = test_router(10).await;

        let created = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/elections",
                json!({ "id": "board-2027", "creator": "0xCreator" }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::OK);
        assert_eq!(json_body(created).await["status"], "open");

        let forbidden = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/elections/board-2027/close",
                json!({ "caller": "0xSomeoneElse" }),
            ))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let closed = router
            .oneshot(json_request(
                "POST",
                "/elections/board-2027/close",
                json!({ "caller": "0xcreator" }),
            ))
            .await
            .unwrap();
        assert_eq!(closed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn peer_transaction_echo_is_quietly_ignored() {
        let router = test_router(10).await;
        let key = SigningKey::random(&mut rand::thread_rng());
        let tx = serde_json::to_value(wallet::sign_vote(&key, ELECTION, "option-a")).unwrap();

        router
            .clone()
            .oneshot(json_request("POST", "/castVote", tx.clone()))
            .await
            .unwrap();

        let echoed = router
            .oneshot(json_request("POST", "/peer/transaction", tx))
            .await
            .unwrap();
        assert_eq!(echoed.status(), StatusCode::OK);
        assert_eq!(json_body(echoed).await["accepted"], false);
    }
}
