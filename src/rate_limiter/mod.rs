use std::time::Duration;

use log::debug;
use rand::Rng;
use tokio::time::sleep;

use crate::config::DelayWindow;

/// Spaces out requests so the remote site never sees back-to-back hits
pub struct RateLimiter {
    delay: Duration,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            request_count: 0,
        }
    }

    pub async fn wait(&mut self) {
        if self.should_wait() {
            sleep(self.delay).await;
        }
        self.request_count += 1;
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    fn should_wait(&self) -> bool {
        self.request_count > 0 && !self.delay.is_zero()
    }
}

/// Pick a uniformly random duration inside the window
pub fn jitter(window: DelayWindow) -> Duration {
    if window.max_ms == 0 {
        return Duration::ZERO;
    }
    let ms = rand::thread_rng().gen_range(window.min_ms..=window.max_ms);
    Duration::from_millis(ms)
}

/// Sleep for a random duration inside the window
pub async fn polite_pause(window: DelayWindow) {
    let delay = jitter(window);
    if delay.is_zero() {
        return;
    }
    debug!("Waiting {:.1}s (polite scraping)...", delay.as_secs_f64());
    sleep(delay).await;
}
