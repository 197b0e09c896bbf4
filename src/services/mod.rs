pub mod ingestion;
pub mod processing;
pub mod report;

pub use ingestion::{IngestionService, ScrapeRequest, ScrapeSummary};
pub use processing::{ProcessingService, UpdateSummary};
