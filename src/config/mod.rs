pub mod settings;

pub use settings::{
    AppConfig, DelayWindow, EloSettings, ReportSettings, ScraperSettings, StorageSettings,
};
