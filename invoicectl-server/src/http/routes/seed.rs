//! Seed endpoint
//!
//! `GET /seed` creates the schema and inserts the configured fixtures in
//! one transaction. Failures roll back and come back as a JSON error body.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::seed::{seed_database, SeedReport, SEED_SUCCESS_MESSAGE};

/// Seed response
#[derive(Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub inserted: SeedReport,
}

/// GET /seed
async fn seed(State(state): State<Arc<AppState>>) -> Result<Json<SeedResponse>, ApiError> {
    let report = seed_database(state.dashboard.pool(), &state.fixtures).await?;
    Ok(Json(SeedResponse {
        message: SEED_SUCCESS_MESSAGE,
        inserted: report,
    }))
}

/// Seed routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/seed", get(seed))
}
