//! Invoice search endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::ValidSearch;
use crate::http::server::AppState;
use crate::models::{InvoiceTableRow, Paginated, INVOICES_PER_PAGE};

/// GET /api/invoices?query=...&page=... - one page of matching invoices
async fn search_invoices(
    State(state): State<Arc<AppState>>,
    search: ValidSearch,
) -> Result<Json<Paginated<InvoiceTableRow>>, ApiError> {
    let (items, total_pages) = tokio::try_join!(
        state.dashboard.fetch_filtered_invoices(&search.query, search.page),
        state.dashboard.fetch_invoice_pages(&search.query),
    )?;

    Ok(Json(Paginated {
        items,
        page: search.page,
        per_page: INVOICES_PER_PAGE,
        total_pages,
    }))
}

/// Invoice routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/invoices", get(search_invoices))
}

#[cfg(test)]
mod tests {
    use crate::http::routes::test_support;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn overlong_query_is_rejected_before_touching_database() {
        let uri = format!("/api/invoices?query={}", "a".repeat(300));
        let (status, body) = test_support::get(test_support::unreachable_router(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_page_is_rejected() {
        let (status, body) =
            test_support::get(test_support::unreachable_router(), "/api/invoices?page=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_page_error_does_not_echo_search_text() {
        let (status, body) = test_support::get(
            test_support::unreachable_router(),
            "/api/invoices?query=private-customer&page=abc",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["message"].as_str().unwrap();
        assert_eq!(message, "invalid page value: 'abc'");
        assert!(!message.contains("private-customer"));
    }

    #[tokio::test]
    async fn database_failure_returns_generic_message() {
        let (status, body) =
            test_support::get(test_support::unreachable_router(), "/api/invoices?query=lee&page=2").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().starts_with("Failed to fetch"));
    }
}
