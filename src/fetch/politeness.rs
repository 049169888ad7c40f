// src/fetch/politeness.rs
// =============================================================================
// Politeness delay: a short random pause after every request so we never
// hammer the site. The jitter keeps our request pattern from looking
// mechanical.
// =============================================================================

use rand::Rng;
use std::time::Duration;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Politeness {
    // None = no pausing at all
    range: Option<(Duration, Duration)>,
}

impl Politeness {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            range: Some((min, max)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.rate_limit_min, config.rate_limit_max)
    }

    /// No delay; for tests and `--no-delay` reruns against a warm cache.
    pub fn none() -> Self {
        Self { range: None }
    }

    /// Picks the next delay, uniformly within the configured range.
    pub fn next_delay(&self) -> Duration {
        match self.range {
            None => Duration::ZERO,
            Some((min, max)) if max <= min => min,
            Some((min, max)) => {
                let millis = rand::rng().random_range(min.as_millis() as u64..=max.as_millis() as u64);
                Duration::from_millis(millis)
            }
        }
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
