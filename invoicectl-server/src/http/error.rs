//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Data-fetch failures only ever expose their caller-safe message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::data::{DataFetchError, FetchErrorKind};
use crate::models::ValidationError;
use crate::seed::SeedError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Dashboard fetch failed (500, or 504 on timeout); already logged
    Fetch(DataFetchError),

    /// Seed run failed and was rolled back (500)
    Seed(SeedError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Fetch(e) => {
                let status = match e.kind() {
                    FetchErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (
                    status,
                    json!({
                        "error": "internal_error",
                        "message": e.to_string()
                    }),
                )
            }
            Self::Seed(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": {
                        "stage": e.stage.to_string(),
                        "message": e.source.to_string()
                    }
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DataFetchError> for ApiError {
    fn from(e: DataFetchError) -> Self {
        Self::Fetch(e)
    }
}

impl From<SeedError> for ApiError {
    fn from(e: SeedError) -> Self {
        Self::Seed(e)
    }
}
