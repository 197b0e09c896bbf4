use crate::domain::{MatchRecord, Outcome};
use crate::errors::TableError;

pub const BASE_COLUMNS: [&str; 6] = ["event_num", "event_id", "round", "player1", "player2", "result"];
pub const FACTION_COLUMNS: [&str; 2] = ["player1_faction", "player2_faction"];

/// Header plus rows of a match CSV, kept as text so tables can be combined
/// without reinterpreting them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MatchTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Faction columns are written only when some record carries one
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let with_factions = records.iter().any(MatchRecord::has_factions);

        let mut headers: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
        if with_factions {
            headers.extend(FACTION_COLUMNS.iter().map(|c| c.to_string()));
        }

        let rows = records
            .iter()
            .map(|record| {
                let mut row = vec![
                    record.event_num.to_string(),
                    record.event_id.clone(),
                    record.round.to_string(),
                    record.player1.clone(),
                    record.player2.clone(),
                    record.result.as_str().to_string(),
                ];
                if with_factions {
                    row.push(record.player1_faction.clone().unwrap_or_default());
                    row.push(record.player2_faction.clone().unwrap_or_default());
                }
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Parse every row back into a record; the error names the offending row
    pub fn to_records(&self) -> Result<Vec<MatchRecord>, TableError> {
        let columns = ColumnIndex::resolve(&self.headers)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                columns
                    .parse(row)
                    .map_err(|reason| TableError::BadRow { row: idx + 1, reason })
            })
            .collect()
    }
}

struct ColumnIndex {
    event_num: usize,
    event_id: usize,
    round: usize,
    player1: usize,
    player2: usize,
    result: usize,
    player1_faction: Option<usize>,
    player2_faction: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, TableError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| TableError::MissingColumn(name.to_string()));

        Ok(Self {
            event_num: require("event_num")?,
            event_id: require("event_id")?,
            round: require("round")?,
            player1: require("player1")?,
            player2: require("player2")?,
            result: require("result")?,
            player1_faction: find("player1_faction"),
            player2_faction: find("player2_faction"),
        })
    }

    fn parse(&self, row: &[String]) -> Result<MatchRecord, String> {
        let cell = |idx: usize| {
            row.get(idx)
                .map(|v| v.trim())
                .ok_or_else(|| format!("missing cell {}", idx + 1))
        };
        let optional = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let event_num = cell(self.event_num)?
            .parse::<u32>()
            .map_err(|e| format!("bad event_num: {e}"))?;
        let round = cell(self.round)?
            .parse::<u32>()
            .map_err(|e| format!("bad round: {e}"))?;
        let score = cell(self.result)?
            .parse::<f64>()
            .map_err(|e| format!("bad result: {e}"))?;
        let result = Outcome::from_score(score).ok_or_else(|| format!("result out of range: {score}"))?;

        let player1 = cell(self.player1)?.to_string();
        let player2 = cell(self.player2)?.to_string();
        if player1.is_empty() || player2.is_empty() {
            return Err("empty player name".to_string());
        }
        if player1 == player2 {
            return Err(format!("{player1} is paired with themselves"));
        }

        Ok(MatchRecord {
            event_num,
            event_id: cell(self.event_id)?.to_string(),
            round,
            player1,
            player2,
            result,
            player1_faction: optional(self.player1_faction),
            player2_faction: optional(self.player2_faction),
        })
    }
}
