use log::info;

use crate::config::EloSettings;
use crate::domain::{MatchRecord, Outcome};

use super::types::{RatingMap, RatingOutcome, RecordMap};

/// Probability that a player rated `rating_a` beats one rated `rating_b`
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Sequential Elo over an ordered match list.
///
/// Ratings feed forward from one match to the next, so the result depends
/// on input order.
pub struct EloEngine {
    settings: EloSettings,
}

impl EloEngine {
    pub fn new(settings: EloSettings) -> Self {
        Self { settings }
    }

    /// Full recompute from an empty rating map
    pub fn compute_ratings(&self, matches: &[MatchRecord]) -> RatingOutcome {
        info!("Calculating Elo ratings for {} matches", matches.len());

        let mut outcome = RatingOutcome::default();
        for record in matches {
            self.apply(&mut outcome.ratings, record);
            tally(&mut outcome.records, record);
        }

        info!("Rated {} players", outcome.ratings.len());
        outcome
    }

    /// New ratings for A and B after A scored `score` (1, 0.5 or 0)
    pub fn update_pair(&self, rating_a: f64, rating_b: f64, score: f64) -> (f64, f64) {
        let expected_a = expected_score(rating_a, rating_b);
        let expected_b = expected_score(rating_b, rating_a);

        let k = self.settings.k_factor;
        let new_a = rating_a + k * (score - expected_a);
        let new_b = rating_b + k * ((1.0 - score) - expected_b);

        (self.round(new_a), self.round(new_b))
    }

    fn apply(&self, ratings: &mut RatingMap, record: &MatchRecord) {
        let rating_a = self.rating_of(ratings, &record.player1);
        let rating_b = self.rating_of(ratings, &record.player2);

        let (new_a, new_b) = self.update_pair(rating_a, rating_b, record.result.score());

        ratings.insert(record.player1.clone(), new_a);
        ratings.insert(record.player2.clone(), new_b);
    }

    fn rating_of(&self, ratings: &RatingMap, player: &str) -> f64 {
        ratings
            .get(player)
            .copied()
            .unwrap_or(self.settings.default_rating)
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.settings.precision);
        (value * factor).round() / factor
    }
}

impl Default for EloEngine {
    fn default() -> Self {
        Self::new(EloSettings::default())
    }
}

fn tally(records: &mut RecordMap, record: &MatchRecord) {
    let (a, b) = match record.result {
        Outcome::Win => ((1, 0, 0), (0, 0, 1)),
        Outcome::Draw => ((0, 1, 0), (0, 1, 0)),
        Outcome::Loss => ((0, 0, 1), (1, 0, 0)),
    };
    for (player, (wins, draws, losses)) in [(&record.player1, a), (&record.player2, b)] {
        let entry = records.entry(player.clone()).or_default();
        entry.wins += wins;
        entry.draws += draws;
        entry.losses += losses;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::PlayerRecord;

    fn game(p1: &str, p2: &str, result: Outcome) -> MatchRecord {
        MatchRecord {
            event_num: 1,
            event_id: "evt".to_string(),
            round: 1,
            player1: p1.to_string(),
            player2: p2.to_string(),
            result,
            player1_faction: None,
            player2_faction: None,
        }
    }

    #[test]
    fn test_expected_score_is_even_for_equal_ratings() {
        assert_eq!(expected_score(1500.0, 1500.0), 0.5);
        assert!((expected_score(1900.0, 1500.0) - 0.909).abs() < 0.001);
    }

    #[test]
    fn test_single_win_from_default() {
        let outcome = EloEngine::default().compute_ratings(&[game("A", "B", Outcome::Win)]);
        assert_eq!(outcome.ratings["A"], 1516.0);
        assert_eq!(outcome.ratings["B"], 1484.0);
    }

    #[test]
    fn test_draw_between_equals_is_a_no_op() {
        let engine = EloEngine::default();
        for rating in [1200.0, 1500.0, 1876.5] {
            let (new_a, new_b) = engine.update_pair(rating, rating, 0.5);
            assert_eq!(new_a - rating, -(new_b - rating));
            assert_eq!(new_a, rating);
        }
    }

    #[test]
    fn test_order_matters() {
        let engine = EloEngine::default();
        let forward = engine.compute_ratings(&[game("A", "B", Outcome::Win), game("A", "C", Outcome::Loss)]);
        let reverse = engine.compute_ratings(&[game("A", "C", Outcome::Loss), game("A", "B", Outcome::Win)]);
        assert_ne!(forward.ratings["A"], reverse.ratings["A"]);
    }

    #[test]
    fn test_ratings_are_rounded_to_two_places() {
        let engine = EloEngine::default();
        let (new_a, new_b) = engine.update_pair(1516.0, 1484.0, 0.0);
        assert_eq!(new_a, (new_a * 100.0).round() / 100.0);
        assert_eq!(new_b, (new_b * 100.0).round() / 100.0);
        assert!(new_a < 1516.0 && new_b > 1484.0);
    }

    #[test]
    fn test_custom_settings() {
        let engine = EloEngine::new(EloSettings {
            default_rating: 1000.0,
            k_factor: 16.0,
            precision: 2,
        });
        let outcome = engine.compute_ratings(&[game("A", "B", Outcome::Win)]);
        assert_eq!(outcome.ratings["A"], 1008.0);
        assert_eq!(outcome.ratings["B"], 992.0);
    }

    #[test]
    fn test_records_follow_raw_results() {
        let outcome = EloEngine::default().compute_ratings(&[
            game("A", "B", Outcome::Win),
            game("A", "B", Outcome::Draw),
            game("B", "C", Outcome::Loss),
        ]);
        assert_eq!(outcome.records["A"], PlayerRecord { wins: 1, draws: 1, losses: 0 });
        assert_eq!(outcome.records["B"], PlayerRecord { wins: 0, draws: 1, losses: 2 });
        assert_eq!(outcome.records["C"], PlayerRecord { wins: 1, draws: 0, losses: 0 });
        assert_eq!(outcome.records["B"].games_played(), 3);
    }

    #[test]
    fn test_recompute_starts_empty() {
        let engine = EloEngine::default();
        let first = engine.compute_ratings(&[game("Ghost", "B", Outcome::Win)]);
        let second = engine.compute_ratings(&[game("A", "B", Outcome::Win)]);
        assert!(first.ratings.contains_key("Ghost"));
        assert!(!second.ratings.contains_key("Ghost"));
        assert_eq!(second.ratings["B"], 1484.0);
    }

    #[test]
    fn test_ranking_orders_by_rating() {
        let outcome = EloEngine::default().compute_ratings(&[
            game("A", "B", Outcome::Win),
            game("C", "D", Outcome::Draw),
        ]);
        let names: Vec<_> = outcome.ranked().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["A", "C", "D", "B"]);
    }
}
