use std::ops::ControlFlow;

use log::{debug, info, warn};

use crate::errors::ScrapeError;
use crate::fetchers::PageSource;

use super::config::PaginationConfig;
use super::iterator::PageIterator;
use super::range::RangeIndicator;

/// Why a page walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The visitor asked to stop
    Stopped,
    /// The range indicator showed the last page
    Exhausted,
    NoIndicator,
    /// More pages were announced but no probe could navigate to them
    NoNextControl,
    PageLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWalk {
    pub pages: usize,
    pub stop: StopReason,
}

/// Load `url` and visit every page of the paginated view behind it.
///
/// After each visit the range indicator decides whether to move on; the next
/// page is reached through the first probe that clicks successfully. The walk
/// never visits more than `config.max_pages` pages.
pub async fn walk_pages<S, F>(
    source: &mut S,
    url: &str,
    config: &PaginationConfig,
    mut visit: F,
) -> Result<PageWalk, ScrapeError>
where
    S: PageSource,
    F: FnMut(&S, usize) -> ControlFlow<()>,
{
    source.goto(url).await?;
    source.wait_idle(config.idle_timeout).await?;

    let mut pages = PageIterator::new(config);

    loop {
        let page = pages.current_page();
        let finish = |stop| Ok(PageWalk { pages: page, stop });

        if visit(source, page).is_break() {
            return finish(StopReason::Stopped);
        }

        let Some(range) = RangeIndicator::find(&source.text()) else {
            debug!("No range indicator on page {}", page);
            return finish(StopReason::NoIndicator);
        };
        if !range.has_more() {
            return finish(StopReason::Exhausted);
        }
        if pages.at_limit() {
            warn!(
                "Stopping after {} pages although {} of {} entries were shown",
                page, range.last, range.total
            );
            return finish(StopReason::PageLimit);
        }

        if !advance(source, &config.next_page_probes).await? {
            warn!("Page {} shows {}-{} of {} but no next-page control worked", page, range.first, range.last, range.total);
            return finish(StopReason::NoNextControl);
        }
        source.wait_idle(config.idle_timeout).await?;
        pages.advance();
        info!("  → Page {}...", pages.current_page());
    }
}

async fn advance<S: PageSource>(source: &mut S, probes: &[String]) -> Result<bool, ScrapeError> {
    for probe in probes {
        if source.try_click(probe).await? {
            debug!("Advanced with probe {:?}", probe);
            return Ok(true);
        }
    }
    Ok(false)
}
