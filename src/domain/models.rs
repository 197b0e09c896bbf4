use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Faction used when the roster page did not reveal one
pub const UNKNOWN_FACTION: &str = "Unknown";

/// Outcome of a pairing from player1's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// Inverse of `score`; anything other than 0, 0.5 or 1 is rejected
    pub fn from_score(score: f64) -> Option<Self> {
        if score == 1.0 {
            Some(Outcome::Win)
        } else if score == 0.5 {
            Some(Outcome::Draw)
        } else if score == 0.0 {
            Some(Outcome::Loss)
        } else {
            None
        }
    }

    /// Column text for the match tables
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win => "1",
            Outcome::Draw => "0.5",
            Outcome::Loss => "0",
        }
    }
}

/// One completed pairing
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub event_num: u32,
    pub event_id: String,
    pub round: u32,
    pub player1: String,
    pub player2: String,
    pub result: Outcome,
    pub player1_faction: Option<String>,
    pub player2_faction: Option<String>,
}

impl MatchRecord {
    pub fn has_factions(&self) -> bool {
        self.player1_faction.is_some() || self.player2_faction.is_some()
    }
}

/// Registry entry for one remote event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event_num: u32,
    pub event_id: String,
    pub name: String,
    pub num_rounds: u32,
    pub scraped_date: NaiveDateTime,
    pub csv_file: String,
}
