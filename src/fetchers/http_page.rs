use std::time::Duration;

use log::debug;
use reqwest::Url;
use scraper::{ElementRef, Html, Node, Selector};
use tokio::time::sleep;

use crate::config::{DelayWindow, ScraperSettings};
use crate::errors::ScrapeError;
use crate::http::RateLimitedClient;
use crate::rate_limiter::jitter;

use super::page_source::{ElementSnapshot, PageSource};

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Page source backed by plain HTTP requests and static HTML parsing.
///
/// "Clicking" a control follows its `href`, so only link-based pagination
/// works; script-only buttons report `false`.
pub struct HttpPageSource {
    client: RateLimitedClient,
    fragment_selector: Selector,
    idle_delay: DelayWindow,
    current_url: Option<Url>,
    body: String,
}

impl HttpPageSource {
    pub fn new(settings: &ScraperSettings) -> Result<Self, ScrapeError> {
        let client = RateLimitedClient::new(
            &settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        let fragment_selector = parse_selector(&settings.fragment_selector)?;

        Ok(Self {
            client,
            fragment_selector,
            idle_delay: settings.page_delay,
            current_url: None,
            body: String::new(),
        })
    }

    fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    fn resolve_link(&self, selector: &str) -> Result<Option<Url>, ScrapeError> {
        let selector = parse_selector(selector)?;
        let document = self.document();
        let href = document
            .select(&selector)
            .find_map(|element| element.value().attr("href").map(str::to_string));

        let (Some(href), Some(base)) = (href, self.current_url.as_ref()) else {
            return Ok(None);
        };
        match base.join(&href) {
            Ok(url) => Ok(Some(url)),
            Err(e) => {
                debug!("Ignoring unusable href {:?}: {}", href, e);
                Ok(None)
            }
        }
    }
}

impl PageSource for HttpPageSource {
    async fn goto(&mut self, url: &str) -> Result<(), ScrapeError> {
        let parsed = Url::parse(url).map_err(|e| ScrapeError::transport(url, e))?;
        self.body = self.client.get_text(url).await?;
        self.current_url = Some(parsed);
        Ok(())
    }

    fn text(&self) -> String {
        let document = self.document();
        visible_lines(document.root_element()).join("\n")
    }

    fn find_elements(&self, selector: &str) -> Result<Vec<ElementSnapshot>, ScrapeError> {
        let selector = parse_selector(selector)?;
        let document = self.document();

        let elements = document
            .select(&selector)
            .map(|element| {
                let fragments = element
                    .select(&self.fragment_selector)
                    .map(|piece| piece.text().collect::<String>().trim().to_string())
                    .collect();
                ElementSnapshot::new(fragments)
            })
            .collect();
        Ok(elements)
    }

    async fn try_click(&mut self, selector: &str) -> Result<bool, ScrapeError> {
        let Some(next) = self.resolve_link(selector)? else {
            return Ok(false);
        };
        if self.current_url.as_ref() == Some(&next) {
            return Ok(false);
        }
        self.goto(next.as_str()).await?;
        Ok(true)
    }

    async fn wait_idle(&mut self, timeout: Duration) -> Result<(), ScrapeError> {
        let delay = jitter(self.idle_delay).min(timeout);
        if !delay.is_zero() {
            debug!("Waiting {:.1}s (polite scraping)...", delay.as_secs_f64());
            sleep(delay).await;
        }
        Ok(())
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector(selector.to_string()))
}

/// Flatten rendered text into lines; runs of whitespace-only text become one blank line
fn visible_lines(root: ElementRef) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|e| e.name().to_string()))
            .is_some_and(|name| HIDDEN_ELEMENTS.contains(&name.as_str()));
        if hidden {
            continue;
        }

        for piece in text.split('\n') {
            let piece = piece.trim();
            if !piece.is_empty() {
                lines.push(piece.to_string());
            } else if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push(String::new());
            }
        }
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_lines_keep_blank_separators() {
        let html = Html::parse_document(
            "<html><body><div><p>Ana Silva - MORALE CHECK</p>\n<p>Orks</p></div><script>var x = 1;</script></body></html>",
        );
        let lines = visible_lines(html.root_element());
        assert_eq!(lines, vec!["Ana Silva - MORALE CHECK", "", "Orks"]);
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        assert!(matches!(parse_selector("a[["), Err(ScrapeError::Selector(_))));
    }

    #[test]
    fn test_find_elements_reads_fragments() {
        let settings = ScraperSettings::default().without_delays();
        let mut source = HttpPageSource::new(&settings).unwrap();
        source.body = r#"<a class="pairing"><p>Table 1</p><p>Ana</p><p> </p><p>Win: 20-10</p></a>"#.to_string();

        let elements = source.find_elements("a.pairing").unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(
            elements[0].sub_text_fragments(),
            &["Table 1", "Ana", "", "Win: 20-10"]
        );
    }

    #[test]
    fn test_resolve_link_joins_relative_href() {
        let settings = ScraperSettings::default().without_delays();
        let mut source = HttpPageSource::new(&settings).unwrap();
        source.current_url = Some(Url::parse("https://example.org/event/abc?round=1").unwrap());
        source.body = r#"<a rel="next" href="?round=1&page=2">Next</a>"#.to_string();

        let next = source.resolve_link("a[rel='next']").unwrap();
        assert_eq!(
            next.map(|u| u.to_string()),
            Some("https://example.org/event/abc?round=1&page=2".to_string())
        );
        assert_eq!(source.resolve_link("a.missing").unwrap(), None);
    }

    #[tokio::test]
    async fn test_click_on_link_to_current_page_does_not_navigate() {
        let settings = ScraperSettings::default().without_delays();
        let mut source = HttpPageSource::new(&settings).unwrap();
        let current = "https://example.org/event/abc?round=1";
        source.current_url = Some(Url::parse(current).unwrap());
        source.body = r#"<a rel="next" href="/event/abc?round=1">Next</a>"#.to_string();

        assert!(!source.try_click("a[rel='next']").await.unwrap());
        assert!(!source.try_click("a.missing").await.unwrap());
        assert_eq!(source.current_url.as_ref().map(Url::as_str), Some(current));
    }
}
