//! HTTP server command for the invoicing dashboard API

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use invoicectl_server::http::{run_server, ServerConfig};
use invoicectl_server::{AppConfig, Dashboard};

use super::seed::load_fixtures;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: from config, else 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Fixture JSON inserted by GET /seed (default: bundled placeholder data)
    #[arg(long, value_name = "PATH")]
    pub fixtures: Option<PathBuf>,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    if let Some(bind) = args.bind {
        config.http.bind = bind;
    }
    config.http.cors_permissive |= args.cors_permissive;

    let fixtures = load_fixtures(args.fixtures.as_deref())?;
    let pool = super::connect(&mut config, args.database_url).await?;

    tracing::info!("Starting invoicectl server on {}", config.http.bind);

    let dashboard = Dashboard::from_config(pool, &config);
    let server_config = ServerConfig::from(&config.http);

    // Blocks until shutdown
    run_server(dashboard, fixtures, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
