//! Summary card aggregates
//!
//! The three aggregates are independent, so they run concurrently on
//! separate pool connections and the call fails as soon as any one fails.

use std::time::Duration;

use sqlx::PgPool;

use super::{with_timeout, DbError};
use crate::models::CardData;

/// Card aggregate repository
pub struct CardRepo<'a> {
    pool: &'a PgPool,
    timeout: Duration,
}

impl<'a> CardRepo<'a> {
    pub fn new(pool: &'a PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub async fn invoice_count(&self) -> Result<Option<i64>, DbError> {
        with_timeout(
            self.timeout,
            sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM invoices").fetch_one(self.pool),
        )
        .await
    }

    pub async fn customer_count(&self) -> Result<Option<i64>, DbError> {
        with_timeout(
            self.timeout,
            sqlx::query_scalar::<_, Option<i64>>("SELECT COUNT(*) FROM customers").fetch_one(self.pool),
        )
        .await
    }

    /// Sum of invoice amounts in cents, split by status: `(paid, pending)`.
    /// Both are `None` when the invoices table is empty.
    pub async fn status_totals(&self) -> Result<(Option<i64>, Option<i64>), DbError> {
        with_timeout(
            self.timeout,
            sqlx::query_as::<_, (Option<i64>, Option<i64>)>(
                r#"
                SELECT
                    SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END) AS paid,
                    SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END) AS pending
                FROM invoices
                "#,
            )
            .fetch_one(self.pool),
        )
        .await
    }

    /// All card figures, queried concurrently.
    pub async fn summary(&self) -> Result<CardData, DbError> {
        let (invoices, customers, (paid, pending)) = tokio::try_join!(
            self.invoice_count(),
            self.customer_count(),
            self.status_totals(),
        )?;

        Ok(CardData::from_aggregates(invoices, customers, paid, pending))
    }
}
