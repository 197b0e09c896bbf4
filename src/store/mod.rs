mod table;

pub use table::{BASE_COLUMNS, FACTION_COLUMNS, MatchTable};

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::StoreError;

/// File-backed key/value store rooted at the data directory.
///
/// Keys are paths relative to the root. Every write goes to a temporary
/// sibling first and is renamed into place, so readers never see a partial
/// document.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| io_error(&root, source))?;
        Ok(Self { root })
    }

    pub fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }

    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
        let data = serde_json::from_str(&json).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        Ok(Some(data))
    }

    pub fn save_json<T: Serialize>(&self, key: &str, data: &T) -> Result<(), StoreError> {
        let path = self.path(key);
        let json = serde_json::to_string_pretty(data).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, json.as_bytes())?;
        info!("Saved {}", path.display());
        Ok(())
    }

    /// `None` when the file does not exist; an empty file yields an empty table
    pub fn read_table(&self, key: &str) -> Result<Option<MatchTable>, StoreError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }

        let csv_error = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(csv_error)?;

        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();
        let mut table = MatchTable::new(headers);
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            table.rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Some(table))
    }

    pub fn write_table(&self, key: &str, table: &MatchTable) -> Result<(), StoreError> {
        let path = self.path(key);
        let csv_error = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&table.headers).map_err(csv_error)?;
        for row in &table.rows {
            writer.write_record(row).map_err(csv_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| io_error(&path, e.into_error()))?;

        write_atomic(&path, &bytes)?;
        info!("Saved to {}", path.display());
        Ok(())
    }

    /// Keys of the files in `dir` named `<prefix>*.<ext>`.
    ///
    /// Files whose middle part is a number come first, in numeric order, so
    /// `event_1000` follows `event_999`. Anything else follows by name.
    pub fn list(&self, dir: &str, prefix: &str, ext: &str) -> Result<Vec<String>, StoreError> {
        let dir_path = self.path(dir);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let suffix = format!(".{}", ext);
        let entries = fs::read_dir(&dir_path).map_err(|source| io_error(&dir_path, source))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| io_error(&dir_path, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(stem) = name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(&suffix))
            else {
                continue;
            };
            if entry.path().is_file() {
                let number = stem.parse::<u64>().ok();
                names.push((number.is_none(), number, name));
            }
        }
        names.sort();
        Ok(names
            .into_iter()
            .map(|(_, _, name)| format!("{}/{}", dir, name))
            .collect())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, bytes).map_err(|source| io_error(&temp_path, source))?;
    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        io_error(path, source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestData {
        value: String,
    }

    #[test]
    fn test_json_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();

        let data = TestData {
            value: "test".to_string(),
        };
        store.save_json("nested/test_key.json", &data).unwrap();
        let loaded: Option<TestData> = store.load_json("nested/test_key.json").unwrap();

        assert_eq!(loaded, Some(data));
        assert!(!store.exists("nested/test_key.json.tmp"));
    }

    #[test]
    fn test_missing_json_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let loaded: Option<BTreeMap<String, f64>> = store.load_json("ratings.json").unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_table_round_trip_keeps_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let table = MatchTable {
            headers: vec!["player1".to_string(), "player2".to_string()],
            rows: vec![
                vec!["O'Brien, Jim".to_string(), "Bo".to_string()],
                vec!["Cy".to_string(), "Di".to_string()],
            ],
        };

        store.write_table("events/event_001.csv", &table).unwrap();
        let loaded = store.read_table("events/event_001.csv").unwrap().unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_list_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let table = MatchTable::new(vec!["a".to_string()]);
        store.write_table("events/event_002.csv", &table).unwrap();
        store.write_table("events/event_001.csv", &table).unwrap();
        store.write_table("events/notes.csv", &table).unwrap();

        let keys = store.list("events", "event_", "csv").unwrap();
        assert_eq!(keys, vec!["events/event_001.csv", "events/event_002.csv"]);
        assert!(store.list("missing", "event_", "csv").unwrap().is_empty());
    }

    #[test]
    fn test_list_orders_numbers_past_padding_width() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();
        let table = MatchTable::new(vec!["a".to_string()]);
        for key in [
            "events/event_1000.csv",
            "events/event_999.csv",
            "events/event_010.csv",
            "events/event_draft.csv",
        ] {
            store.write_table(key, &table).unwrap();
        }

        let keys = store.list("events", "event_", "csv").unwrap();
        assert_eq!(
            keys,
            vec![
                "events/event_010.csv",
                "events/event_999.csv",
                "events/event_1000.csv",
                "events/event_draft.csv",
            ]
        );
    }
}
