//! Liveness probe for the invoice dashboard API
//!
//! `GET /health` answers from the process alone: it never touches the pool,
//! so it stays green while PostgreSQL is down and the `/api/*` routes
//! return 500s. Use `/api/cards` for a database-backed check.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// `{"status": "ok", "version": <invoicectl-server crate version>}`
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Stateless, so it merges into any router state.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
