//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Literal SQL with bound parameters (no string interpolation)
//! - Uses JOINs for list operations (no N+1)
//! - Every query runs under the configured query timeout

pub mod cards;
pub mod invoices;
pub mod revenue;

use std::future::Future;
use std::time::Duration;

pub use cards::CardRepo;
pub use invoices::InvoiceRepo;
pub use revenue::RevenueRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("query timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("unexpected value in column {column}: {reason}")]
    Decode { column: &'static str, reason: String },
}

impl DbError {
    /// True when the store itself could not be reached (as opposed to a
    /// query that reached it and failed).
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::Sqlx(
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            )
        )
    }
}

/// Run a query future under `limit`, mapping expiry to [`DbError::Timeout`].
pub(crate) async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(DbError::Timeout {
            seconds: limit.as_secs(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_query_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, sqlx::Error>(1)
        };

        let err = with_timeout(Duration::from_secs(10), slow).await.unwrap_err();
        assert!(matches!(err, DbError::Timeout { seconds: 10 }));
    }

    #[tokio::test]
    async fn fast_query_passes_through() {
        let value = with_timeout(Duration::from_secs(1), async { Ok::<_, sqlx::Error>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn classifies_connection_errors() {
        assert!(DbError::Sqlx(sqlx::Error::PoolTimedOut).is_connection());
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).is_connection());
        assert!(!DbError::Timeout { seconds: 1 }.is_connection());
    }
}
