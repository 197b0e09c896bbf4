use std::collections::BTreeMap;

pub type PlayerName = String;
pub type RatingValue = f64;

/// Player → rating; the persisted snapshot is exactly this map
pub type RatingMap = BTreeMap<PlayerName, RatingValue>;
pub type RecordMap = BTreeMap<PlayerName, PlayerRecord>;

/// Win/draw/loss tally derived from raw results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl PlayerRecord {
    pub fn games_played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// "W-D-L"
    pub fn summary(&self) -> String {
        format!("{}-{}-{}", self.wins, self.draws, self.losses)
    }
}

/// Ratings plus records from one full recompute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingOutcome {
    pub ratings: RatingMap,
    pub records: RecordMap,
}

impl RatingOutcome {
    /// Highest rating first; ties broken by name
    pub fn ranked(&self) -> Vec<(&str, RatingValue)> {
        rank(&self.ratings)
    }
}

pub fn rank(ratings: &RatingMap) -> Vec<(&str, RatingValue)> {
    let mut ranked: Vec<(&str, RatingValue)> = ratings
        .iter()
        .map(|(name, rating)| (name.as_str(), *rating))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}
