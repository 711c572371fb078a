//! Dashboard endpoints: revenue chart, latest invoices, summary cards

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{CardData, DashboardOverview, LatestInvoice, Revenue};

/// GET /api/revenue
async fn revenue(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Revenue>>, ApiError> {
    Ok(Json(state.dashboard.fetch_revenue().await?))
}

/// GET /api/invoices/latest
async fn latest_invoices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LatestInvoice>>, ApiError> {
    Ok(Json(state.dashboard.fetch_latest_invoices().await?))
}

/// GET /api/cards
async fn cards(State(state): State<Arc<AppState>>) -> Result<Json<CardData>, ApiError> {
    Ok(Json(state.dashboard.fetch_card_data().await?))
}

/// GET /api/overview - everything the landing page needs in one call
async fn overview(State(state): State<Arc<AppState>>) -> Result<Json<DashboardOverview>, ApiError> {
    Ok(Json(state.dashboard.fetch_overview().await?))
}

/// Dashboard routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/revenue", get(revenue))
        .route("/api/invoices/latest", get(latest_invoices))
        .route("/api/cards", get(cards))
        .route("/api/overview", get(overview))
}

#[cfg(test)]
mod tests {
    use crate::http::routes::test_support;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn database_failure_returns_generic_message() {
        let (status, body) = test_support::get(test_support::unreachable_router(), "/api/revenue").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "Failed to fetch revenue data.");
    }

    #[tokio::test]
    async fn card_failure_is_fail_fast() {
        let (status, body) = test_support::get(test_support::unreachable_router(), "/api/cards").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch card data.");
    }

    #[tokio::test]
    async fn overview_failure_is_labelled_as_overview() {
        let (status, body) = test_support::get(test_support::unreachable_router(), "/api/overview").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to fetch dashboard data.");
    }
}
