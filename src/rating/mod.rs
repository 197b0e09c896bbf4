pub mod elo;
pub mod types;

pub use elo::{EloEngine, expected_score};
pub use types::{PlayerRecord, RatingMap, RatingOutcome, RecordMap, rank};
