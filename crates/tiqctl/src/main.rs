//! tiqctl - one-shot CLI views over the ticket feed.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;

use tiq_common::config::TiqConfig;
use tiq_common::feed::FeedClient;
use tiq_common::ticket::Ticket;

use tiqctl::cli::{Cli, Commands};
use tiqctl::{alerts, export, status, theme_cmd, tickets};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Status { json } => {
            let feed = load_tickets(&cli).await?;
            status::run(&feed, *json)
        }
        Commands::Tickets { query, sort, limit } => {
            let feed = load_tickets(&cli).await?;
            tickets::run(&feed, query, *sort, *limit)
        }
        Commands::Export {
            output,
            query,
            sort,
        } => {
            let feed = load_tickets(&cli).await?;
            export::run(&feed, query, *sort, output)
        }
        Commands::Alerts => {
            let feed = load_tickets(&cli).await?;
            alerts::run(&feed)
        }
        Commands::Theme { value } => theme_cmd::run(*value),
    }
}

/// Resolve the feed URL (flag first, config second) and fetch once.
async fn load_tickets(cli: &Cli) -> Result<Vec<Ticket>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(TiqConfig::default_path);
    let config = TiqConfig::load(&config_path)?;

    let url = match &cli.url {
        Some(url) if !url.is_empty() => url.clone(),
        _ => config.feed_url.clone(),
    };
    if url.is_empty() {
        bail!(
            "no feed url configured; set feed_url in {} or pass --url",
            config_path.display()
        );
    }

    let client = FeedClient::new(&url, Duration::from_secs(config.request_timeout_secs))?;
    Ok(client.fetch().await?)
}
