//! invoicectl CLI - invoicing dashboard data service
//!
//! Entry point for the `invoicectl` command-line tool:
//! - `serve`: HTTP API for the dashboard panels and the seed endpoint
//! - `seed`: create the schema and insert fixture rows
//! - `fetch`: run a single dashboard query and print JSON
//! - `completions`: shell completion scripts

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use invoicectl_server::AppConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "invoicectl",
    author,
    version,
    about = "Data service for an invoicing dashboard: revenue, invoices, customers",
    long_about = "Serve and query the data behind an invoicing dashboard backed by PostgreSQL. \
                  Seed a fresh database with placeholder data, then fetch revenue, the latest \
                  invoices, summary cards or paginated invoice searches."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.invoicectl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and insert fixture data in one transaction
    Seed(commands::seed::SeedArgs),
    /// Run one dashboard query and print the result as JSON
    Fetch(commands::fetch::FetchArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Load `.env` from the current directory, then `~/.invoicectl/.env`.
/// Variables already in the environment are never overwritten.
fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(home_dir) = dirs::home_dir() {
        let env_file = home_dir.join(".invoicectl").join(".env");
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let result = run(cli).await;
    tracing_setup::shutdown_otel();
    result
}

fn load_config(cli_path: Option<&Path>) -> Result<AppConfig> {
    load_dotenv();
    AppConfig::load(cli_path).context("Failed to load configuration")
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, load_config(config_path)?).await?,
        Commands::Seed(args) => commands::run_seed(args, load_config(config_path)?).await?,
        Commands::Fetch(args) => commands::run_fetch(args, load_config(config_path)?).await?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
