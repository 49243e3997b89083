//! REST surface of a ledger instance
//!
//! One router serves both audiences: wallets and auditors on the public
//! routes, sibling instances on the `/peer` routes. All responses are JSON.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{AppState, HttpServer};
