use std::time::Duration;

use crate::config::ScraperSettings;

/// Configuration for walking a paginated view
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub max_pages: Option<usize>,
    /// Selectors for the "next page" control, highest priority first
    pub next_page_probes: Vec<String>,
    pub idle_timeout: Duration,
}

impl PaginationConfig {
    pub fn new() -> Self {
        Self {
            max_pages: None,
            next_page_probes: Vec::new(),
            idle_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_settings(settings: &ScraperSettings) -> Self {
        Self::new()
            .with_max_pages(settings.max_pages)
            .with_probes(settings.next_page_probes.clone())
            .with_idle_timeout(Duration::from_secs(settings.timeout_secs))
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }

    pub fn with_probes(mut self, probes: Vec<String>) -> Self {
        self.next_page_probes = probes;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new()
    }
}
