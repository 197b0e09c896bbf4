pub mod aggregation;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod pagination;
pub mod rate_limiter;
pub mod rating;
pub mod registry;
pub mod services;
pub mod store;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;
use log::warn;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::fetchers::HttpPageSource;
use crate::registry::EventRegistry;
use crate::services::report::{EventListing, RankingsTable, TopRatings};
use crate::services::{IngestionService, ProcessingService, ScrapeRequest};
use crate::store::Store;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_store(config: &AppConfig) -> Result<Store> {
    Store::new(&config.storage.data_dir).with_context(|| {
        format!(
            "Failed to open data directory {}",
            config.storage.data_dir.display()
        )
    })
}

pub fn handle_scrape(
    event_id: String,
    num_rounds: u32,
    team: Option<String>,
    name: Option<String>,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let store = open_store(&config)?;
        let source = HttpPageSource::new(&config.scraper)?;

        let request = ScrapeRequest {
            event_id,
            num_rounds,
            team,
            name,
        };
        let mut service = IngestionService::new(config, store, source);
        let summary = service.run(&request).await?;

        match summary.output {
            Some(path) => println!(
                "{} {} matches for event #{} saved to {}",
                "✓".green(),
                summary.matches,
                summary.event_num,
                path.display()
            ),
            None => println!(
                "{} No matches found for event #{}",
                "!".yellow(),
                summary.event_num
            ),
        }
        Ok(())
    })
}

pub fn handle_update() -> Result<()> {
    let config = AppConfig::new();
    let store = open_store(&config)?;
    let top_n = config.report.top_n;
    let service = ProcessingService::new(config, store);
    let summary = service.run()?;

    println!(
        "{} Combined {} matches, ratings updated for {} players",
        "✓".green(),
        summary.matches,
        summary.outcome.ratings.len()
    );
    println!();
    print!(
        "{}",
        TopRatings {
            ratings: &summary.outcome.ratings,
            top_n,
        }
    );
    Ok(())
}

pub fn handle_rankings() -> Result<()> {
    let config = AppConfig::new();
    let store = open_store(&config)?;
    let title = config.report.title.clone();
    let service = ProcessingService::new(config, store);

    let ratings = match service.load_ratings()? {
        Some(ratings) if !ratings.is_empty() => ratings,
        Some(_) => {
            println!("No ratings available yet.");
            return Ok(());
        }
        None => {
            println!("No ratings found. Run 'update' first.");
            return Ok(());
        }
    };
    let records = service.load_records().unwrap_or_else(|e| {
        warn!("Showing rankings without records: {:#}", e);
        None
    });

    print!(
        "{}",
        RankingsTable {
            title: &title,
            ratings: &ratings,
            records: records.as_ref(),
        }
    );
    Ok(())
}

pub fn handle_events() -> Result<()> {
    let config = AppConfig::new();
    let store = open_store(&config)?;
    let registry = EventRegistry::open(store, config.storage.clone())
        .context("Failed to load event registry")?;

    print!("{}", EventListing(registry.events()));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
