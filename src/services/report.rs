use std::fmt;

use crate::domain::EventRecord;
use crate::rating::{RatingMap, RecordMap, rank};

/// "Top N" summary printed after a rating update
pub struct TopRatings<'a> {
    pub ratings: &'a RatingMap,
    pub top_n: usize,
}

impl fmt::Display for TopRatings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Elo Ratings (Top {}):", self.top_n)?;
        writeln!(f, "{}", "=".repeat(50))?;
        for (idx, (player, rating)) in rank(self.ratings).into_iter().take(self.top_n).enumerate() {
            writeln!(f, "  {:>2}. {:<30} {:>7.2}", idx + 1, player, rating)?;
        }
        Ok(())
    }
}

/// Full markdown rankings table, with a W-D-L column when records are known
pub struct RankingsTable<'a> {
    pub title: &'a str,
    pub ratings: &'a RatingMap,
    pub records: Option<&'a RecordMap>,
}

impl fmt::Display for RankingsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "```")?;
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;

        if self.records.is_some() {
            writeln!(f, "| Rank | Player                  | Rating  |  W-D-L  |")?;
            writeln!(f, "|------|-------------------------|---------|---------|")?;
        } else {
            writeln!(f, "| Rank | Player                  | Rating  |")?;
            writeln!(f, "|------|-------------------------|---------|")?;
        }

        for (idx, (player, rating)) in rank(self.ratings).into_iter().enumerate() {
            write!(f, "| {:^4} | {:<23} | {:>7.2} |", idx + 1, player, rating)?;
            if let Some(records) = self.records {
                let summary = records
                    .get(player)
                    .map(|r| r.summary())
                    .unwrap_or_else(|| "-".to_string());
                write!(f, " {:^7} |", summary)?;
            }
            writeln!(f)?;
        }

        let average = self.ratings.values().sum::<f64>() / self.ratings.len().max(1) as f64;
        writeln!(f)?;
        writeln!(f, "**Total Players:** {}  ", self.ratings.len())?;
        writeln!(f, "**Average Rating:** {:.2}", average)?;
        writeln!(f, "```")
    }
}

pub struct EventListing<'a>(pub &'a [EventRecord]);

impl fmt::Display for EventListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No events registered yet.");
        }

        writeln!(f, "Registered Events:")?;
        writeln!(f, "{}", "=".repeat(80))?;
        for event in self.0 {
            writeln!(f, "  #{:03}: {}", event.event_num, event.name)?;
            writeln!(f, "         ID: {}", event.event_id)?;
            writeln!(f, "         Rounds: {}", event.num_rounds)?;
            writeln!(f, "         File: {}", event.csv_file)?;
            writeln!(f, "         Scraped: {}", event.scraped_date.format("%Y-%m-%d"))?;
            writeln!(f)?;
        }
        Ok(())
    }
}
