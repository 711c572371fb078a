//! Seed command: create the schema and insert fixture rows

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use invoicectl_server::seed::SEED_SUCCESS_MESSAGE;
use invoicectl_server::{seed_database, AppConfig, Fixtures};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Fixture JSON to insert (default: bundled placeholder data)
    #[arg(long, value_name = "PATH")]
    pub fixtures: Option<PathBuf>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

pub(crate) fn load_fixtures(path: Option<&Path>) -> Result<Fixtures> {
    match path {
        Some(path) => Fixtures::from_path(path)
            .with_context(|| format!("Failed to load fixtures from {}", path.display())),
        None => Fixtures::placeholder().context("Bundled placeholder fixtures are invalid"),
    }
}

pub async fn run_seed(args: SeedArgs, mut config: AppConfig) -> Result<()> {
    let fixtures = load_fixtures(args.fixtures.as_deref())?;
    let pool = super::connect(&mut config, args.database_url).await?;

    let result = seed_database(&pool, &fixtures).await;
    pool.close().await;
    let report = result.context("Seed failed and was rolled back")?;

    println!("{SEED_SUCCESS_MESSAGE}");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
