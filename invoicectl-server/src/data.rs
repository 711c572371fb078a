//! Dashboard data access
//!
//! [`Dashboard`] is the entry point presentation code calls. Every fetch
//! logs the underlying failure with full detail and hands back a
//! [`DataFetchError`] whose `Display` is safe to show to an end user.

use std::fmt;
use std::time::{Duration, Instant};

use sqlx::PgPool;

use crate::config::{AppConfig, EmptyResultPolicy};
use crate::db::repos::{CardRepo, DbError, InvoiceRepo, RevenueRepo};
use crate::models::{
    CardData, DashboardOverview, InvoiceTableRow, LatestInvoice, Pagination, Revenue, SearchQuery,
    INVOICES_PER_PAGE,
};

/// Which dashboard fetch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOperation {
    Revenue,
    LatestInvoices,
    CardData,
    FilteredInvoices,
    InvoicePages,
    Overview,
}

impl FetchOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::LatestInvoices => "latest_invoices",
            Self::CardData => "card_data",
            Self::FilteredInvoices => "filtered_invoices",
            Self::InvoicePages => "invoice_pages",
            Self::Overview => "overview",
        }
    }

    /// Message shown to callers; never includes database detail.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Revenue => "Failed to fetch revenue data.",
            Self::LatestInvoices => "Failed to fetch the latest invoices.",
            Self::CardData => "Failed to fetch card data.",
            Self::FilteredInvoices => "Failed to fetch invoices.",
            Self::InvoicePages => "Failed to fetch total number of invoices.",
            Self::Overview => "Failed to fetch dashboard data.",
        }
    }
}

/// Coarse failure category, for callers that need to tell them apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The database could not be reached
    Connection,
    /// The database was reached but the query failed
    Query,
    /// The query did not finish within the configured timeout
    Timeout,
    /// Zero rows where [`EmptyResultPolicy::Reject`] demands at least one
    EmptyResult,
}

/// Caller-safe data fetch error
#[derive(Debug)]
pub struct DataFetchError {
    operation: FetchOperation,
    kind: FetchErrorKind,
    source: Option<DbError>,
}

impl DataFetchError {
    pub(crate) fn from_db(operation: FetchOperation, err: DbError) -> Self {
        let kind = match &err {
            DbError::Timeout { .. } => FetchErrorKind::Timeout,
            e if e.is_connection() => FetchErrorKind::Connection,
            _ => FetchErrorKind::Query,
        };
        tracing::error!(operation = operation.as_str(), error = %err, "Database error");
        Self {
            operation,
            kind,
            source: Some(err),
        }
    }

    pub(crate) fn empty(operation: FetchOperation) -> Self {
        tracing::error!(operation = operation.as_str(), "Query returned no rows");
        Self {
            operation,
            kind: FetchErrorKind::EmptyResult,
            source: None,
        }
    }

    pub fn operation(&self) -> FetchOperation {
        self.operation
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    /// Re-label an error from a nested fetch (used by the overview).
    fn within(mut self, operation: FetchOperation) -> Self {
        self.operation = operation;
        self
    }
}

impl fmt::Display for DataFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation.failure_message())
    }
}

impl std::error::Error for DataFetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Dashboard data access over a shared pool
#[derive(Clone)]
pub struct Dashboard {
    pool: PgPool,
    query_timeout: Duration,
    empty_results: EmptyResultPolicy,
}

impl Dashboard {
    pub fn new(pool: PgPool, query_timeout: Duration, empty_results: EmptyResultPolicy) -> Self {
        Self {
            pool,
            query_timeout,
            empty_results,
        }
    }

    pub fn from_config(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(
            pool,
            config.database.query_timeout(),
            config.data.empty_results,
        )
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn check_empty<T>(&self, operation: FetchOperation, rows: &[T]) -> Result<(), DataFetchError> {
        if rows.is_empty() && self.empty_results == EmptyResultPolicy::Reject {
            return Err(DataFetchError::empty(operation));
        }
        Ok(())
    }

    /// All rows of the revenue table.
    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>, DataFetchError> {
        let op = FetchOperation::Revenue;
        let started = Instant::now();
        tracing::debug!("Fetching revenue data");

        let rows = RevenueRepo::new(&self.pool, self.query_timeout)
            .list()
            .await
            .map_err(|e| DataFetchError::from_db(op, e))?;
        self.check_empty(op, &rows)?;

        tracing::debug!(
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Revenue fetch complete"
        );
        Ok(rows)
    }

    /// The five most recent invoices with customer details.
    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DataFetchError> {
        InvoiceRepo::new(&self.pool, self.query_timeout)
            .latest()
            .await
            .map_err(|e| DataFetchError::from_db(FetchOperation::LatestInvoices, e))
    }

    /// Invoice and customer counts plus paid/pending totals.
    pub async fn fetch_card_data(&self) -> Result<CardData, DataFetchError> {
        CardRepo::new(&self.pool, self.query_timeout)
            .summary()
            .await
            .map_err(|e| DataFetchError::from_db(FetchOperation::CardData, e))
    }

    /// One page (six rows) of invoices matching `query`. Pages below 1 are
    /// treated as page 1.
    pub async fn fetch_filtered_invoices(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<Vec<InvoiceTableRow>, DataFetchError> {
        let op = FetchOperation::FilteredInvoices;
        let rows = InvoiceRepo::new(&self.pool, self.query_timeout)
            .search(query, Pagination::invoices(page))
            .await
            .map_err(|e| DataFetchError::from_db(op, e))?;
        self.check_empty(op, &rows)?;
        Ok(rows)
    }

    /// Number of pages the search for `query` spans (at least 1).
    pub async fn fetch_invoice_pages(&self, query: &SearchQuery) -> Result<u32, DataFetchError> {
        let total = InvoiceRepo::new(&self.pool, self.query_timeout)
            .count_matching(query)
            .await
            .map_err(|e| DataFetchError::from_db(FetchOperation::InvoicePages, e))?;
        Ok(Pagination::total_pages(total, INVOICES_PER_PAGE))
    }

    /// Revenue, latest invoices and card data, fetched concurrently.
    pub async fn fetch_overview(&self) -> Result<DashboardOverview, DataFetchError> {
        let (revenue, latest_invoices, cards) = tokio::try_join!(
            self.fetch_revenue(),
            self.fetch_latest_invoices(),
            self.fetch_card_data(),
        )
        .map_err(|e| e.within(FetchOperation::Overview))?;

        Ok(DashboardOverview {
            revenue,
            latest_invoices,
            cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_hides_database_detail() {
        let err = DataFetchError::from_db(
            FetchOperation::Revenue,
            DbError::Decode {
                column: "status",
                reason: "secret detail".into(),
            },
        );
        assert_eq!(err.to_string(), "Failed to fetch revenue data.");
        assert_eq!(err.kind(), FetchErrorKind::Query);
        assert!(err.source().unwrap().to_string().contains("secret detail"));
    }

    #[test]
    fn classifies_timeouts_and_connection_failures() {
        let err = DataFetchError::from_db(FetchOperation::CardData, DbError::Timeout { seconds: 3 });
        assert_eq!(err.kind(), FetchErrorKind::Timeout);

        let err = DataFetchError::from_db(
            FetchOperation::CardData,
            DbError::Sqlx(sqlx::Error::PoolTimedOut),
        );
        assert_eq!(err.kind(), FetchErrorKind::Connection);
        assert_eq!(err.to_string(), "Failed to fetch card data.");
    }

    #[test]
    fn empty_result_has_no_source() {
        let err = DataFetchError::empty(FetchOperation::FilteredInvoices);
        assert_eq!(err.kind(), FetchErrorKind::EmptyResult);
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Failed to fetch invoices.");
    }

    #[test]
    fn overview_relabels_nested_failure() {
        let err = DataFetchError::empty(FetchOperation::Revenue).within(FetchOperation::Overview);
        assert_eq!(err.operation(), FetchOperation::Overview);
        assert_eq!(err.kind(), FetchErrorKind::EmptyResult);
    }

    #[tokio::test]
    async fn empty_policy_is_enforced_only_when_rejecting() {
        let url = "postgres://postgres@127.0.0.1:1/invoices";
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(url)
            .expect("url should parse");

        let allow = Dashboard::new(pool.clone(), Duration::from_secs(1), EmptyResultPolicy::Allow);
        assert!(allow.check_empty::<Revenue>(FetchOperation::Revenue, &[]).is_ok());

        let reject = Dashboard::new(pool, Duration::from_secs(1), EmptyResultPolicy::Reject);
        let err = reject
            .check_empty::<Revenue>(FetchOperation::Revenue, &[])
            .unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::EmptyResult);

        let one = [Revenue {
            month: "Jan".into(),
            revenue: 200,
        }];
        assert!(reject.check_empty(FetchOperation::Revenue, &one).is_ok());
    }

    #[tokio::test]
    async fn unreachable_database_is_a_connection_error() {
        let config = crate::config::DatabaseConfig {
            acquire_timeout_secs: 1,
            ..Default::default()
        };
        let pool = crate::db::create_pool_lazy("postgres://postgres@127.0.0.1:1/invoices", &config)
            .expect("url should parse");
        let dashboard = Dashboard::new(pool, Duration::from_secs(5), EmptyResultPolicy::Allow);

        let err = dashboard.fetch_revenue().await.unwrap_err();
        assert_eq!(err.operation(), FetchOperation::Revenue);
        assert_eq!(err.kind(), FetchErrorKind::Connection);
        assert_eq!(err.to_string(), "Failed to fetch revenue data.");
    }
}
