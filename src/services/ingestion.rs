use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::AppConfig;
use crate::domain::MatchRecord;
use crate::fetchers::{PageSource, Roster, RosterScraper, RoundScraper};
use crate::rate_limiter::polite_pause;
use crate::registry::EventRegistry;
use crate::store::{MatchTable, Store};

/// What to scrape
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub event_id: String,
    pub num_rounds: u32,
    pub team: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeSummary {
    pub event_num: u32,
    pub matches: usize,
    /// `None` when nothing was extracted and no file was written
    pub output: Option<PathBuf>,
    pub team_filtered: bool,
}

/// Scrapes one event into its per-event match table
pub struct IngestionService<S: PageSource> {
    config: AppConfig,
    store: Store,
    source: S,
}

impl<S: PageSource> IngestionService<S> {
    pub fn new(config: AppConfig, store: Store, source: S) -> Self {
        Self {
            config,
            store,
            source,
        }
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub async fn run(&mut self, request: &ScrapeRequest) -> Result<ScrapeSummary> {
        info!("=== Scraping event {} ===", request.event_id);

        // Step 1: Number the event
        let event_num = self.register_event(request)?;
        let output_key = self.config.storage.event_file(event_num);
        info!("   Event #{}, {} rounds, output {}", event_num, request.num_rounds, output_key);

        // Step 2: Team roster, if filtering
        let roster = self.resolve_roster(request).await?;

        // Step 3: Every round in order
        let results = self.scrape_rounds(request, event_num, roster.as_ref()).await?;
        info!(
            "Total: {} matches across {} rounds",
            results.len(),
            request.num_rounds
        );

        // Step 4: Persist
        let output = self.save_results(&results, &output_key)?;

        info!("=== Event #{} done ===", event_num);
        Ok(ScrapeSummary {
            event_num,
            matches: results.len(),
            output,
            team_filtered: roster.is_some(),
        })
    }

    fn register_event(&self, request: &ScrapeRequest) -> Result<u32> {
        let mut registry = EventRegistry::open(self.store.clone(), self.config.storage.clone())
            .context("Failed to load event registry")?;
        let name = request.name.as_deref().unwrap_or_default();
        registry
            .register(&request.event_id, request.num_rounds, name)
            .with_context(|| format!("Failed to register event {}", request.event_id))
    }

    async fn resolve_roster(&mut self, request: &ScrapeRequest) -> Result<Option<Roster>> {
        let Some(team) = request.team.as_deref() else {
            return Ok(None);
        };

        let scraper = RosterScraper::new(&self.config.scraper);
        let roster = scraper
            .resolve_roster(&mut self.source, &request.event_id, team)
            .await
            .with_context(|| format!("Failed to fetch roster for team '{}'", team))?;

        if roster.is_empty() {
            warn!("No players found for team '{}', proceeding without team filter", team);
            return Ok(None);
        }
        Ok(Some(roster))
    }

    async fn scrape_rounds(
        &mut self,
        request: &ScrapeRequest,
        event_num: u32,
        roster: Option<&Roster>,
    ) -> Result<Vec<MatchRecord>> {
        let scraper = RoundScraper::new(&self.config.scraper);
        let mut all_results = Vec::new();

        for round_num in 1..=request.num_rounds {
            let round_results = scraper
                .extract_round(&mut self.source, &request.event_id, event_num, round_num, roster)
                .await
                .with_context(|| format!("Failed to scrape round {}", round_num))?;
            all_results.extend(round_results);

            if round_num < request.num_rounds {
                polite_pause(self.config.scraper.round_delay).await;
            }
        }

        Ok(all_results)
    }

    fn save_results(&self, results: &[MatchRecord], key: &str) -> Result<Option<PathBuf>> {
        if results.is_empty() {
            warn!("No results found");
            return Ok(None);
        }

        let table = MatchTable::from_records(results);
        self.store
            .write_table(key, &table)
            .with_context(|| format!("Failed to save {}", key))?;
        Ok(Some(self.store.path(key)))
    }
}
