//! Fetch command: run one dashboard query and print the result as JSON

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use invoicectl_server::models::{Paginated, SearchQuery, INVOICES_PER_PAGE};
use invoicectl_server::{AppConfig, Dashboard};

#[derive(Parser, Debug)]
pub struct FetchArgs {
    #[command(subcommand)]
    pub command: FetchCommand,

    /// Database URL (overrides config/environment)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Print compact single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Subcommand, Debug)]
pub enum FetchCommand {
    /// Monthly revenue rows
    Revenue,
    /// The five most recent invoices
    Latest,
    /// Invoice/customer counts and paid/pending totals
    Cards,
    /// Revenue, latest invoices and cards in one document
    Overview,
    /// Search invoices, six per page
    Invoices {
        /// Matched case-insensitively against name, email, amount, date and status
        #[arg(long, short = 'q', default_value = "")]
        query: String,

        /// Page number, starting at 1
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,
    },
}

pub async fn run_fetch(args: FetchArgs, mut config: AppConfig) -> Result<()> {
    let pool = super::connect(&mut config, args.database_url).await?;
    let dashboard = Dashboard::from_config(pool, &config);

    let result = fetch(&dashboard, args.command).await;
    dashboard.pool().close().await;
    print_json(&result?, args.compact)
}

async fn fetch(dashboard: &Dashboard, command: FetchCommand) -> Result<serde_json::Value> {
    let value = match command {
        FetchCommand::Revenue => serde_json::to_value(dashboard.fetch_revenue().await?)?,
        FetchCommand::Latest => serde_json::to_value(dashboard.fetch_latest_invoices().await?)?,
        FetchCommand::Cards => serde_json::to_value(dashboard.fetch_card_data().await?)?,
        FetchCommand::Overview => serde_json::to_value(dashboard.fetch_overview().await?)?,
        FetchCommand::Invoices { query, page } => {
            let query = SearchQuery::new(&query)?;
            let page = page.max(1);
            let (items, total_pages) = tokio::try_join!(
                dashboard.fetch_filtered_invoices(&query, page),
                dashboard.fetch_invoice_pages(&query),
            )?;
            serde_json::to_value(Paginated {
                items,
                page,
                per_page: INVOICES_PER_PAGE,
                total_pages,
            })?
        }
    };
    Ok(value)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}
