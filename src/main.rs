use anyhow::Result;
use colored::Colorize;

use pairings_elo::cli::Command;
use pairings_elo::{
    handle_completions, handle_events, handle_rankings, handle_scrape, handle_update, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Scrape {
            event_id,
            num_rounds,
            team,
            name,
        } => handle_scrape(event_id, num_rounds, team, name),
        Command::Update => handle_update(),
        Command::Rankings => handle_rankings(),
        Command::Events => handle_events(),
        Command::Completions { shell } => handle_completions(shell),
    }
}
