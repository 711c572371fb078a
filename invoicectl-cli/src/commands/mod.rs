//! Command implementations for invoicectl CLI

pub mod fetch;
pub mod seed;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use fetch::run_fetch;
pub use seed::run_seed;
pub use serve::run_serve;

use anyhow::{Context, Result};
use invoicectl_server::db::{create_pool, PgPool};
use invoicectl_server::AppConfig;

/// Apply a `--database-url` override and connect.
pub(crate) async fn connect(config: &mut AppConfig, database_url: Option<String>) -> Result<PgPool> {
    if let Some(url) = database_url {
        config.database.url = Some(url);
    }

    let url = config.database_url().context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.invoicectl/config.toml",
    )?;

    create_pool(url, &config.database)
        .await
        .context("Failed to connect to database")
}
