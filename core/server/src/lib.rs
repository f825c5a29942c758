//! HTTP surface of SmsVault.
//!
//! A single endpoint, `GET /sms/latest/?provider=<name>`, resolves the named
//! backup provider, fetches the latest SMS backup, parses it, and returns the
//! messages as JSON. Each request is independent: resolution constructs and
//! authenticates a fresh provider, and nothing is cached in between.

pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;

pub use error::ApiError;
pub use state::AppState;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sms/latest/", get(handlers::get_latest_sms))
        .with_state(state)
}
