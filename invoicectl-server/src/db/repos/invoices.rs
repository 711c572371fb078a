//! Invoice repository
//!
//! Both list queries JOIN customers so each invoice row carries the
//! customer's name, email and avatar in a single round trip.

use std::time::Duration;

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{with_timeout, DbError};
use crate::models::{InvoiceStatus, InvoiceTableRow, LatestInvoice, Pagination, SearchQuery};

/// Number of invoices shown in the "latest invoices" panel
pub const LATEST_INVOICES_LIMIT: i64 = 5;

const SEARCH_FILTER: &str = r#"
    customers.name ILIKE $1 OR
    customers.email ILIKE $1 OR
    invoices.amount::text ILIKE $1 OR
    invoices.date::text ILIKE $1 OR
    invoices.status ILIKE $1
"#;

/// Invoice repository
pub struct InvoiceRepo<'a> {
    pool: &'a PgPool,
    timeout: Duration,
}

impl<'a> InvoiceRepo<'a> {
    pub fn new(pool: &'a PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// The most recent invoices by date, newest first. Amounts are the stored
    /// cents rendered as a string.
    pub async fn latest(&self) -> Result<Vec<LatestInvoice>, DbError> {
        let rows = with_timeout(
            self.timeout,
            sqlx::query(
                r#"
                SELECT invoices.amount, customers.name, customers.image_url, customers.email, invoices.id
                FROM invoices
                JOIN customers ON invoices.customer_id = customers.id
                ORDER BY invoices.date DESC
                LIMIT $1
                "#,
            )
            .bind(LATEST_INVOICES_LIMIT)
            .fetch_all(self.pool),
        )
        .await?;

        rows.into_iter()
            .map(|r| -> Result<LatestInvoice, DbError> {
                Ok(LatestInvoice {
                    id: r.try_get("id")?,
                    name: r.try_get("name")?,
                    image_url: r.try_get("image_url")?,
                    email: r.try_get("email")?,
                    amount: r.try_get::<i32, _>("amount")?.to_string(),
                })
            })
            .collect()
    }

    /// One page of invoices matching `query`, newest first.
    pub async fn search(
        &self,
        query: &SearchQuery,
        page: Pagination,
    ) -> Result<Vec<InvoiceTableRow>, DbError> {
        let sql = format!(
            r#"
            SELECT
                invoices.id,
                invoices.customer_id,
                invoices.amount,
                invoices.date,
                invoices.status,
                customers.name,
                customers.email,
                customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE {SEARCH_FILTER}
            ORDER BY invoices.date DESC, invoices.id
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = with_timeout(
            self.timeout,
            sqlx::query(&sql)
                .bind(query.like_pattern())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(self.pool),
        )
        .await?;

        rows.iter().map(table_row).collect()
    }

    /// Total number of invoices matching `query`.
    pub async fn count_matching(&self, query: &SearchQuery) -> Result<i64, DbError> {
        let sql = format!(
            r#"
            SELECT COUNT(*)
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE {SEARCH_FILTER}
            "#
        );

        with_timeout(
            self.timeout,
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(query.like_pattern())
                .fetch_one(self.pool),
        )
        .await
    }
}

fn table_row(r: &PgRow) -> Result<InvoiceTableRow, DbError> {
    let status: String = r.try_get("status")?;
    let status = status
        .parse::<InvoiceStatus>()
        .map_err(|e| DbError::Decode {
            column: "status",
            reason: e.to_string(),
        })?;

    Ok(InvoiceTableRow {
        id: r.try_get("id")?,
        customer_id: r.try_get("customer_id")?,
        name: r.try_get("name")?,
        email: r.try_get("email")?,
        image_url: r.try_get("image_url")?,
        date: r.try_get("date")?,
        amount: r.try_get("amount")?,
        status,
    })
}
