use std::collections::BTreeMap;
use std::ops::ControlFlow;

use log::{info, warn};

use crate::config::ScraperSettings;
use crate::domain::{UNKNOWN_FACTION, normalize};
use crate::errors::ScrapeError;
use crate::pagination::{PaginationConfig, walk_pages};

use super::page_source::PageSource;

/// Normalized player name → faction, for one team at one event
pub type Roster = BTreeMap<String, String>;

/// Discovers which players belong to a team, and what they played, from the
/// event's placings view
pub struct RosterScraper {
    base_url: String,
    status_tokens: Vec<String>,
    pagination: PaginationConfig,
}

impl RosterScraper {
    pub fn new(settings: &ScraperSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            status_tokens: settings.roster_status_tokens.clone(),
            pagination: PaginationConfig::from_settings(settings),
        }
    }

    /// Walk every placings page and collect the team's players.
    ///
    /// An empty roster means the team never appeared; callers fall back to
    /// unfiltered extraction.
    pub async fn resolve_roster<S: PageSource>(
        &self,
        source: &mut S,
        event_id: &str,
        team_name: &str,
    ) -> Result<Roster, ScrapeError> {
        let team_name = team_name.trim();
        let mut roster = Roster::new();
        if team_name.is_empty() {
            return Ok(roster);
        }

        let url = self.build_url(event_id);
        info!("Fetching {} roster: {}", team_name, url);

        walk_pages(source, &url, &self.pagination, |page, _| {
            self.parse_page(&page.text(), team_name, &mut roster);
            ControlFlow::Continue(())
        })
        .await?;

        if roster.is_empty() {
            warn!("No players found for team '{}'", team_name);
        } else {
            info!("  → Found {} {} players", roster.len(), team_name);
            for (player, faction) in &roster {
                info!("      {}: {}", player, faction);
            }
        }
        Ok(roster)
    }

    /// Add every "<name> - <team>" row of one page; later rows win
    pub fn parse_page(&self, text: &str, team_name: &str, roster: &mut Roster) {
        let marker = format!(" - {}", team_name);
        let lines: Vec<&str> = text.lines().collect();

        for (idx, line) in lines.iter().enumerate() {
            let Some((raw_name, _)) = line.split_once(&marker) else {
                continue;
            };
            let player = normalize(raw_name);
            if player.is_empty() {
                continue;
            }
            let faction = self.faction_at(&lines, idx + 2);
            roster.insert(player, faction);
        }
    }

    fn faction_at(&self, lines: &[&str], idx: usize) -> String {
        let candidate = lines.get(idx).map(|line| line.trim()).unwrap_or_default();
        if candidate.is_empty() || self.is_status_token(candidate) {
            UNKNOWN_FACTION.to_string()
        } else {
            candidate.to_string()
        }
    }

    fn is_status_token(&self, text: &str) -> bool {
        self.status_tokens
            .iter()
            .any(|token| token.eq_ignore_ascii_case(text))
    }

    fn build_url(&self, event_id: &str) -> String {
        format!(
            "{}/event/{}?active_tab=placings",
            self.base_url,
            urlencoding::encode(event_id)
        )
    }
}
