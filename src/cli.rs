use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tabletop event pairings scraper and Elo ranker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Scrape every round of an event into its own match table
    Scrape {
        /// Event identifier from the pairings site URL
        event_id: String,
        /// Number of rounds to scrape
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        num_rounds: u32,
        /// Only keep pairings between members of this team
        #[arg(short, long)]
        team: Option<String>,
        /// Display name for the event (defaults to "Event N")
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Combine all event tables and recompute ratings from scratch
    Update,
    /// Print the full rankings table
    Rankings,
    /// List registered events
    Events,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
