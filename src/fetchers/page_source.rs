use std::time::Duration;

use crate::errors::ScrapeError;

/// Text pieces of one element on the current page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementSnapshot {
    fragments: Vec<String>,
}

impl ElementSnapshot {
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    pub fn sub_text_fragments(&self) -> &[String] {
        &self.fragments
    }
}

/// A navigable view of the pairing site, one current page at a time.
///
/// Implementations only need to render pages; all parsing lives in the
/// roster and round scrapers. Errors returned here are transport failures
/// and abort the page walk that triggered them.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Load `url` and make it the current page
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError>;

    /// Visible text of the current page, newline-delimited
    fn text(&self) -> String;

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>, ScrapeError>;

    /// Activate the first control matching `selector`.
    /// `Ok(false)` means nothing matched and the page is unchanged.
    async fn try_click(&mut self, selector: &str) -> Result<bool, ScrapeError>;

    async fn wait_idle(&mut self, timeout: Duration) -> Result<(), ScrapeError>;
}
