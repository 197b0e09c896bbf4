use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EloSettings {
    pub default_rating: f64,
    pub k_factor: f64,
    /// Decimal digits kept after every update
    pub precision: i32,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            default_rating: 1500.0,
            k_factor: 32.0,
            precision: 2,
        }
    }
}

/// Uniform random wait window, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayWindow {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayWindow {
    pub const NONE: DelayWindow = DelayWindow { min_ms: 0, max_ms: 0 };

    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
    pub pairing_selector: String,
    pub fragment_selector: String,
    /// Tried in order; the first one that navigates wins
    pub next_page_probes: Vec<String>,
    pub max_pages: usize,
    pub page_delay: DelayWindow,
    pub round_delay: DelayWindow,
    pub roster_status_tokens: Vec<String>,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.bestcoastpairings.com".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 30,
            rate_limit_ms: 1000,
            pairing_selector: "a.css-1dgqwoj".to_string(),
            fragment_selector: "p".to_string(),
            next_page_probes: vec![
                "a[rel='next']".to_string(),
                "button[aria-label='Go to next page']".to_string(),
                "a[aria-label='Go to next page']".to_string(),
                "li.next > a".to_string(),
                "a.next".to_string(),
            ],
            max_pages: 50,
            page_delay: DelayWindow::new(2000, 4000),
            round_delay: DelayWindow::new(3000, 5000),
            roster_status_tokens: vec![
                "CHECKED IN".to_string(),
                "DROPPED".to_string(),
                "View List".to_string(),
            ],
        }
    }
}

impl ScraperSettings {
    /// No waits at all, for fixtures
    pub fn without_delays(mut self) -> Self {
        self.rate_limit_ms = 0;
        self.page_delay = DelayWindow::NONE;
        self.round_delay = DelayWindow::NONE;
        self
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub events_dir: String,
    pub registry_file: String,
    pub combined_file: String,
    pub ratings_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let data_dir = std::env::var("PAIRINGS_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        Self::with_data_dir(data_dir)
    }
}

impl StorageSettings {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            events_dir: "events".to_string(),
            registry_file: "events.json".to_string(),
            combined_file: "all_events.csv".to_string(),
            ratings_file: "ratings.json".to_string(),
        }
    }

    /// Relative path of the match table for one event, as recorded in the registry
    pub fn event_file(&self, event_num: u32) -> String {
        format!("{}/event_{:03}.csv", self.events_dir, event_num)
    }
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub title: String,
    pub top_n: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: "MORALE CHECK ELO RANKINGS".to_string(),
            top_n: 10,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub elo: EloSettings,
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
    pub report: ReportSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
