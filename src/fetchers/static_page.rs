use std::collections::HashMap;
use std::time::Duration;

use crate::errors::ScrapeError;

use super::page_source::{ElementSnapshot, PageSource};

/// One pre-rendered page: its visible text, element snapshots per selector
/// and navigation targets per clickable selector.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    text: String,
    elements: HashMap<String, Vec<ElementSnapshot>>,
    links: HashMap<String, String>,
}

impl StaticPage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_elements(mut self, selector: &str, elements: Vec<ElementSnapshot>) -> Self {
        self.elements.insert(selector.to_string(), elements);
        self
    }

    pub fn with_link(mut self, selector: &str, url: &str) -> Self {
        self.links.insert(selector.to_string(), url.to_string());
        self
    }
}

/// In-memory site for replaying saved pages without a network
#[derive(Debug, Default)]
pub struct StaticPageSource {
    pages: HashMap<String, StaticPage>,
    current: Option<String>,
    visits: Vec<String>,
}

impl StaticPageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: StaticPage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    /// Every URL loaded so far, in order
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    fn current_page(&self) -> Option<&StaticPage> {
        self.current.as_ref().and_then(|url| self.pages.get(url))
    }
}

impl PageSource for StaticPageSource {
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        if !self.pages.contains_key(url) {
            return Err(ScrapeError::transport(url, "page not available"));
        }
        self.current = Some(url.to_string());
        self.visits.push(url.to_string());
        Ok(())
    }

    fn text(&self) -> String {
        self.current_page()
            .map(|page| page.text.clone())
            .unwrap_or_default()
    }

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>, ScrapeError> {
        Ok(self
            .current_page()
            .and_then(|page| page.elements.get(selector))
            .cloned()
            .unwrap_or_default())
    }

    async fn try_click(&mut self, selector: &str) -> Result<bool, ScrapeError> {
        let target = self
            .current_page()
            .and_then(|page| page.links.get(selector))
            .cloned();
        match target {
            Some(url) => {
                self.goto(&url).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn wait_idle(&mut self, _timeout: Duration) -> Result<(), ScrapeError> {
        Ok(())
    }
}
