//! Revenue repository

use std::time::Duration;

use sqlx::PgPool;

use super::{with_timeout, DbError};
use crate::models::Revenue;

/// Revenue repository
pub struct RevenueRepo<'a> {
    pool: &'a PgPool,
    timeout: Duration,
}

impl<'a> RevenueRepo<'a> {
    pub fn new(pool: &'a PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// All rows of the revenue table, in storage order.
    pub async fn list(&self) -> Result<Vec<Revenue>, DbError> {
        with_timeout(
            self.timeout,
            sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue").fetch_all(self.pool),
        )
        .await
    }
}
