use super::config::PaginationConfig;

/// Page counter with an optional upper bound
pub struct PageIterator {
    current_page: usize,
    max_pages: Option<usize>,
}

impl PageIterator {
    pub fn new(config: &PaginationConfig) -> Self {
        Self {
            current_page: 1,
            max_pages: config.max_pages,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// True once the current page is the last one the guard allows
    pub fn at_limit(&self) -> bool {
        self.max_pages.is_some_and(|max| self.current_page >= max)
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }
}
