//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and an acquire timeout,
//! so an unreachable database surfaces as an error instead of a hang.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections.max(1))
        .acquire_timeout(config.acquire_timeout())
}

/// Create a PostgreSQL connection pool and open the first connection.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/invoices", &config.database).await?;
/// ```
pub async fn create_pool(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Connecting to database"
    );
    pool_options(config).connect(database_url).await
}

/// Create a pool that connects on first use.
///
/// Only parses the URL; connection failures show up on the first query.
pub fn create_pool_lazy(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    pool_options(config).connect_lazy(database_url)
}
