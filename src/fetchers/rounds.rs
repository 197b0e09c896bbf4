use std::ops::ControlFlow;

use log::{debug, info, warn};

use crate::config::ScraperSettings;
use crate::domain::{MatchRecord, Outcome, UNKNOWN_FACTION, normalize};
use crate::errors::ScrapeError;
use crate::pagination::{PaginationConfig, walk_pages};

use super::page_source::{ElementSnapshot, PageSource};
use super::roster::Roster;

const UP_TO_DATE_MARKER: &str = "Placings are up to date";
const ROUND_MARKER: &str = "Round";
const MIN_FRAGMENTS: usize = 7;

/// Extracts the completed pairings of one round
pub struct RoundScraper {
    base_url: String,
    pairing_selector: String,
    pagination: PaginationConfig,
}

impl RoundScraper {
    pub fn new(settings: &ScraperSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            pairing_selector: settings.pairing_selector.clone(),
            pagination: PaginationConfig::from_settings(settings),
        }
    }

    /// Scrape every page of a round.
    ///
    /// Returns an empty list when the round does not exist yet. With a
    /// non-empty roster only intra-team pairings are kept and carry factions.
    pub async fn extract_round<S: PageSource>(
        &self,
        source: &mut S,
        event_id: &str,
        event_num: u32,
        round_num: u32,
        roster: Option<&Roster>,
    ) -> Result<Vec<MatchRecord>, ScrapeError> {
        let url = self.build_url(event_id, round_num);
        info!("Round {}: {}", round_num, url);

        let roster = roster.filter(|r| !r.is_empty());
        let context = RoundContext {
            event_id,
            event_num,
            round_num,
            roster,
        };
        let mut results = Vec::new();
        let mut failure = None;

        walk_pages(source, &url, &self.pagination, |page, page_num| {
            if page_num == 1 && !round_exists(&page.text()) {
                info!("   Round {} has not been paired yet", round_num);
                return ControlFlow::Break(());
            }

            let elements = match page.find_elements(&self.pairing_selector) {
                Ok(elements) => elements,
                Err(e) => {
                    failure = Some(e);
                    return ControlFlow::Break(());
                }
            };
            if elements.is_empty() && page_num == 1 {
                warn!("   No matches found");
            }

            for element in &elements {
                match context.parse_pairing(element) {
                    Ok(Some(record)) => results.push(record),
                    Ok(None) => {}
                    Err(e) => debug!("   Skipping element: {}", e),
                }
            }
            ControlFlow::Continue(())
        })
        .await?;

        if let Some(e) = failure {
            return Err(e);
        }

        info!("   Extracted {} matches", results.len());
        Ok(results)
    }

    fn build_url(&self, event_id: &str, round_num: u32) -> String {
        format!(
            "{}/event/{}?round={}",
            self.base_url,
            urlencoding::encode(event_id),
            round_num
        )
    }
}

struct RoundContext<'a> {
    event_id: &'a str,
    event_num: u32,
    round_num: u32,
    roster: Option<&'a Roster>,
}

impl RoundContext<'_> {
    /// `Ok(None)` when the pairing is filtered out by the roster
    fn parse_pairing(&self, element: &ElementSnapshot) -> Result<Option<MatchRecord>, ScrapeError> {
        let texts: Vec<&str> = element
            .sub_text_fragments()
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();

        if texts.len() < MIN_FRAGMENTS {
            return Err(ScrapeError::MalformedElement(format!(
                "expected {} text fragments, found {}",
                MIN_FRAGMENTS,
                texts.len()
            )));
        }

        let player1 = normalize(texts[1]);
        let player2 = normalize(texts[5]);
        if player1.is_empty() || player2.is_empty() || player1 == player2 {
            return Err(ScrapeError::MalformedElement(format!(
                "unusable players {:?} vs {:?}",
                texts[1], texts[5]
            )));
        }

        let (player1_faction, player2_faction) = match self.roster {
            Some(roster) => {
                let (Some(f1), Some(f2)) = (roster.get(&player1), roster.get(&player2)) else {
                    return Ok(None);
                };
                (Some(faction_or_unknown(f1)), Some(faction_or_unknown(f2)))
            }
            None => (None, None),
        };

        Ok(Some(MatchRecord {
            event_num: self.event_num,
            event_id: self.event_id.to_string(),
            round: self.round_num,
            player1,
            player2,
            result: classify_outcome(texts[3]),
            player1_faction,
            player2_faction,
        }))
    }
}

fn round_exists(text: &str) -> bool {
    text.contains(UP_TO_DATE_MARKER) || text.contains(ROUND_MARKER)
}

fn faction_or_unknown(faction: &str) -> String {
    if faction.trim().is_empty() {
        UNKNOWN_FACTION.to_string()
    } else {
        faction.to_string()
    }
}

/// Player1's outcome label: "Win: 20-10", "Loss: 5-15", "Draw: 10-10".
/// Unrecognized labels still count as a draw.
pub fn classify_outcome(label: &str) -> Outcome {
    if label.contains("Win:") {
        Outcome::Win
    } else if label.contains("Loss:") {
        Outcome::Loss
    } else {
        if !(label.contains("Draw:") || label.contains("Tie:")) {
            warn!("Unrecognized outcome label {:?}, scoring as draw", label);
        }
        Outcome::Draw
    }
}
