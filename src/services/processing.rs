use anyhow::{Context, Result};
use log::info;

use crate::aggregation::combine_events;
use crate::config::AppConfig;
use crate::errors::AggregateError;
use crate::rating::{EloEngine, RatingMap, RatingOutcome, RecordMap};
use crate::store::Store;

/// Result of one full rebuild
#[derive(Debug, Clone)]
pub struct UpdateSummary {
    /// Rows in the combined table
    pub matches: usize,
    pub outcome: RatingOutcome,
}

/// Rebuilds the combined table and the rating snapshot from every event file
pub struct ProcessingService {
    config: AppConfig,
    store: Store,
}

impl ProcessingService {
    pub fn new(config: AppConfig, store: Store) -> Self {
        Self { config, store }
    }

    pub fn run(&self) -> Result<UpdateSummary> {
        info!("=== Updating Elo Ratings ===");

        // Step 1: Combine and parse every event file
        let combined = combine_events(&self.store, &self.config.storage)
            .context("Failed to combine event files")?;
        info!("  → Combined {} matches", combined.matches.len());

        // Step 2: Recompute from scratch so players dropped by a re-filtered
        // scrape do not linger
        let outcome = EloEngine::new(self.config.elo.clone()).compute_ratings(&combined.matches);

        // Step 3: Replace the snapshot
        self.store
            .save_json(&self.config.storage.ratings_file, &outcome.ratings)
            .context("Failed to save ratings")?;

        info!("=== Ratings saved to {} ===", self.config.storage.ratings_file);
        Ok(UpdateSummary {
            matches: combined.matches.len(),
            outcome,
        })
    }

    pub fn load_ratings(&self) -> Result<Option<RatingMap>> {
        self.store
            .load_json(&self.config.storage.ratings_file)
            .context("Failed to load ratings")
    }

    /// Records recomputed from the combined table, if it exists
    pub fn load_records(&self) -> Result<Option<RecordMap>> {
        let Some(combined) = self
            .store
            .read_table(&self.config.storage.combined_file)
            .context("Failed to read combined table")?
        else {
            return Ok(None);
        };

        let matches = combined
            .to_records()
            .map_err(|e| AggregateError::malformed(&self.config.storage.combined_file, e))?;
        let outcome = EloEngine::new(self.config.elo.clone()).compute_ratings(&matches);
        Ok(Some(outcome.records))
    }
}
