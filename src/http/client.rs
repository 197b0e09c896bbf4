use std::time::Duration;

use reqwest::Client;

use crate::errors::ScrapeError;
use crate::rate_limiter::RateLimiter;

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self, ScrapeError> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// GET the page body; non-2xx statuses count as transport failures
    pub async fn get_text(&mut self, url: &str) -> Result<String, ScrapeError> {
        self.rate_limiter.wait().await;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(url, e.without_url()))?;

        if !response.status().is_success() {
            return Err(ScrapeError::transport(url, format!("HTTP error: {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, format!("Failed to read body: {e}")))
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, ScrapeError> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ScrapeError::transport("", format!("Failed to build HTTP client: {e}")))
    }
}
