//! Custom Axum extractors

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{SearchParams, SearchQuery, ValidationError};

/// Validated invoice search: `?query=<text>&page=<n>`.
///
/// A missing query matches everything; a missing or zero page means page 1.
pub struct ValidSearch {
    pub query: SearchQuery,
    pub page: u32,
}

impl<S> FromRequestParts<S> for ValidSearch
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params): Query<SearchParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                // `page` is the only field that can fail to deserialize
                ApiError::Validation(ValidationError::InvalidVariant {
                    field: "page",
                    value: raw_param(parts.uri.query().unwrap_or_default(), "page")
                        .unwrap_or_default()
                        .to_owned(),
                })
            })?;

        let query = SearchQuery::new(params.query.as_deref().unwrap_or_default())?;
        Ok(Self {
            query,
            page: params.page.unwrap_or(1).max(1),
        })
    }
}

/// Raw (still percent-encoded) value of the first `name=` pair in a query string.
fn raw_param<'q>(query: &'q str, name: &str) -> Option<&'q str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_param_picks_only_the_named_value() {
        assert_eq!(raw_param("query=lee&page=abc", "page"), Some("abc"));
        assert_eq!(raw_param("page=2&page=3", "page"), Some("2"));
        assert_eq!(raw_param("query=page", "page"), None);
        assert_eq!(raw_param("", "page"), None);
    }
}
