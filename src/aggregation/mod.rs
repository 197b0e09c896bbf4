use log::info;

use crate::config::StorageSettings;
use crate::domain::MatchRecord;
use crate::errors::AggregateError;
use crate::store::{MatchTable, Store};

const EVENT_FILE_PREFIX: &str = "event_";

/// Concatenate per-event tables in the given order.
///
/// The header comes from the first non-empty table; every later non-empty
/// table must carry exactly the same columns.
pub fn aggregate<'a, I>(tables: I) -> Result<MatchTable, AggregateError>
where
    I: IntoIterator<Item = (&'a str, &'a MatchTable)>,
{
    let mut combined: Option<MatchTable> = None;

    for (name, table) in tables {
        if table.is_empty() {
            continue;
        }

        match combined.as_mut() {
            None => combined = Some(table.clone()),
            Some(acc) => {
                if acc.headers != table.headers {
                    return Err(AggregateError::MalformedInput {
                        file: name.to_string(),
                        reason: format!(
                            "columns {:?} do not match {:?}",
                            table.headers, acc.headers
                        ),
                    });
                }
                acc.rows.extend(table.rows.iter().cloned());
            }
        }
    }

    let combined = combined.ok_or(AggregateError::NoInput)?;
    check_row_widths(&combined)?;
    Ok(combined)
}

fn check_row_widths(table: &MatchTable) -> Result<(), AggregateError> {
    let width = table.headers.len();
    match table.rows.iter().position(|row| row.len() != width) {
        Some(idx) => Err(AggregateError::MalformedInput {
            file: "combined table".to_string(),
            reason: format!("row {} has {} cells, expected {}", idx + 1, table.rows[idx].len(), width),
        }),
        None => Ok(()),
    }
}

/// The combined table together with its parsed rows
#[derive(Debug, Clone)]
pub struct CombinedEvents {
    pub table: MatchTable,
    pub matches: Vec<MatchRecord>,
}

/// Combine every `events/event_*.csv` into the combined table and persist it.
///
/// Every row of every file is parsed before anything is written, so a bad
/// file leaves the previous combined table in place.
pub fn combine_events(store: &Store, storage: &StorageSettings) -> Result<CombinedEvents, AggregateError> {
    let keys = store.list(&storage.events_dir, EVENT_FILE_PREFIX, "csv")?;
    if keys.is_empty() {
        return Err(AggregateError::NoInput);
    }
    info!("Combining {} event files...", keys.len());

    let mut tables = Vec::with_capacity(keys.len());
    for key in keys {
        if let Some(table) = store.read_table(&key)? {
            info!("   ✓ {}", key);
            tables.push((key, table));
        }
    }

    let table = aggregate(tables.iter().map(|(key, table)| (key.as_str(), table)))?;

    let mut matches = Vec::with_capacity(table.len());
    for (key, event_table) in tables.iter().filter(|(_, t)| !t.is_empty()) {
        let records = event_table
            .to_records()
            .map_err(|e| AggregateError::malformed(key, e))?;
        matches.extend(records);
    }

    store.write_table(&storage.combined_file, &table)?;
    info!("Combined {} matches -> {}", table.len(), storage.combined_file);
    Ok(CombinedEvents { table, matches })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> MatchTable {
        MatchTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_concatenates_in_order() {
        let e1 = table(&["player1", "player2"], &[&["A", "B"], &["C", "D"]]);
        let e2 = table(&["player1", "player2"], &[&["E", "F"], &["G", "H"], &["I", "J"]]);

        let combined = aggregate([("e1", &e1), ("e2", &e2)]).unwrap();
        assert_eq!(combined.len(), 5);
        let firsts: Vec<_> = combined.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(firsts, vec!["A", "C", "E", "G", "I"]);
    }

    #[test]
    fn test_header_taken_from_first_non_empty() {
        let empty = table(&["other"], &[]);
        let e2 = table(&["player1", "player2"], &[&["A", "B"]]);
        let combined = aggregate([("e1", &empty), ("e2", &e2)]).unwrap();
        assert_eq!(combined.headers, vec!["player1", "player2"]);
    }

    #[test]
    fn test_mismatched_header_is_rejected() {
        let e1 = table(&["player1", "player2"], &[&["A", "B"]]);
        let e2 = table(&["player1", "player2", "player1_faction"], &[&["C", "D", "Orks"]]);
        let err = aggregate([("e1", &e1), ("e2", &e2)]).unwrap_err();
        assert!(matches!(err, AggregateError::MalformedInput { ref file, .. } if file == "e2"));
    }

    #[test]
    fn test_no_input() {
        let empty = table(&["player1"], &[]);
        assert!(matches!(aggregate([("e1", &empty)]), Err(AggregateError::NoInput)));
        assert!(matches!(aggregate(Vec::new()), Err(AggregateError::NoInput)));
    }

    #[test]
    fn test_short_row_is_rejected() {
        let e1 = table(&["player1", "player2"], &[&["A"]]);
        assert!(matches!(
            aggregate([("e1", &e1)]),
            Err(AggregateError::MalformedInput { .. })
        ));
    }

    fn event_table(players: &[(&str, &str, &str)]) -> MatchTable {
        let rows: Vec<Vec<&str>> = players
            .iter()
            .map(|(p1, p2, result)| vec!["1", "evt", "1", *p1, *p2, *result])
            .collect();
        let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        table(&crate::store::BASE_COLUMNS, &rows)
    }

    #[test]
    fn test_combine_events_writes_combined_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let storage = StorageSettings::with_data_dir(dir.path());
        store
            .write_table("events/event_002.csv", &event_table(&[("C", "D", "0")]))
            .unwrap();
        store
            .write_table("events/event_001.csv", &event_table(&[("A", "B", "1")]))
            .unwrap();

        let combined = combine_events(&store, &storage).unwrap();
        assert_eq!(combined.table.rows[0][3], "A");
        let players: Vec<_> = combined.matches.iter().map(|m| m.player1.as_str()).collect();
        assert_eq!(players, vec!["A", "C"]);
        let persisted = store.read_table(&storage.combined_file).unwrap().unwrap();
        assert_eq!(persisted, combined.table);
    }

    #[test]
    fn test_bad_row_keeps_previous_combined_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let storage = StorageSettings::with_data_dir(dir.path());
        store
            .write_table("events/event_001.csv", &event_table(&[("A", "B", "1")]))
            .unwrap();
        let before = combine_events(&store, &storage).unwrap().table;

        store
            .write_table("events/event_002.csv", &event_table(&[("C", "D", "win")]))
            .unwrap();
        let err = combine_events(&store, &storage).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::MalformedInput { ref file, .. } if file == "events/event_002.csv"
        ));

        let persisted = store.read_table(&storage.combined_file).unwrap().unwrap();
        assert_eq!(persisted, before);
    }

    #[test]
    fn test_combine_events_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let storage = StorageSettings::with_data_dir(dir.path());
        assert!(matches!(combine_events(&store, &storage), Err(AggregateError::NoInput)));
        assert!(!store.exists(&storage.combined_file));
    }
}
