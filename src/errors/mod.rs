use std::path::PathBuf;

use thiserror::Error;

/// Failures while driving the page source
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Fetch, timeout or navigation failure. Aborts the current round or roster walk.
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// A single pairing element did not parse. Recovered by skipping the element.
    #[error("malformed pairing element: {0}")]
    MalformedElement(String),

    #[error("invalid selector {0:?}")]
    Selector(String),
}

impl ScrapeError {
    pub fn transport(url: &str, reason: impl ToString) -> Self {
        ScrapeError::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failures of the file-backed store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A stored match table that does not parse back into records
#[derive(Debug, Error)]
pub enum TableError {
    #[error("missing column {0:?}")]
    MissingColumn(String),

    /// Rows are numbered from 1, header excluded
    #[error("row {row}: {reason}")]
    BadRow { row: usize, reason: String },
}

/// Failures while combining per-event match tables
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("no event files with matches found")]
    NoInput,

    #[error("malformed input in {file}: {reason}")]
    MalformedInput { file: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AggregateError {
    pub fn malformed(file: &str, reason: impl ToString) -> Self {
        AggregateError::MalformedInput {
            file: file.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failures of the event registry document
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("event number space exhausted")]
    Exhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_names_url() {
        let err = ScrapeError::transport("https://example.org/x", "timed out");
        assert_eq!(
            err.to_string(),
            "transport error for https://example.org/x: timed out"
        );
    }

    #[test]
    fn test_malformed_input_names_file_and_row() {
        let err = AggregateError::malformed(
            "events/event_002.csv",
            TableError::BadRow {
                row: 3,
                reason: "bad result".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "malformed input in events/event_002.csv: row 3: bad result"
        );
    }
}
