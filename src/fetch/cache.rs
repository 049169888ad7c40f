// src/fetch/cache.rs
// =============================================================================
// On-disk response cache.
//
// Each successful response is stored as one JSON file named after the
// SHA-256 of its URL:
//
//   data/cache/3f5a...e1.json   {"url": "...", "fetched_at": "...", "body": "..."}
//
// A fresh entry (younger than the TTL) is served without touching the
// network. Stale, missing or unreadable entries fall through to the inner
// fetcher, whose successful answer replaces the entry. Errors are never
// cached.
// =============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FetchError, PageFetcher};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: DateTime<Utc>,
    body: String,
}

pub struct CachedFetcher<F> {
    inner: F,
    dir: PathBuf,
    ttl: Duration,
}

impl<F: PageFetcher> CachedFetcher<F> {
    pub fn new(inner: F, dir: PathBuf, ttl: Duration) -> Self {
        Self { inner, dir, ttl }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let key = hex::encode(Sha256::digest(url.as_bytes()));
        self.dir.join(format!("{}.json", key))
    }

    async fn lookup(&self, url: &str) -> Option<String> {
        let raw = tokio::fs::read_to_string(self.entry_path(url)).await.ok()?;

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(url, error = %e, "Ignoring unreadable cache entry");
                return None;
            }
        };

        // Hash collisions are not a practical concern, but a copied cache dir might be
        if entry.url != url {
            return None;
        }

        // A timestamp from the future counts as brand new
        let age = (Utc::now() - entry.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            debug!(url, age_secs = age.as_secs(), "Cache entry expired");
            return None;
        }

        Some(entry.body)
    }

    async fn store(&self, url: &str, body: &str) -> anyhow::Result<()> {
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body: body.to_string(),
        };
        let json = serde_json::to_string(&entry)?;
        tokio::fs::write(self.entry_path(url), json).await?;
        Ok(())
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for CachedFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.lookup(url).await {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        let body = self.inner.fetch(url).await?;

        // A cache that can't be written only costs us a refetch next time
        if let Err(e) = self.store(url, &body).await {
            warn!(url, error = %e, "Failed to write cache entry");
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    const URL: &str = "https://www.whosdatedwho.com/dating/zendaya";

    #[tokio::test]
    async fn test_fresh_entry_is_served_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let inner = MockFetcher::new().with_page(URL, "<h1>Zendaya</h1>");
        let cached = CachedFetcher::new(inner, dir.path().to_path_buf(), Duration::from_secs(3600));

        assert_eq!(cached.fetch(URL).await.unwrap(), "<h1>Zendaya</h1>");
        assert_eq!(cached.fetch(URL).await.unwrap(), "<h1>Zendaya</h1>");
        assert_eq!(cached.inner.requests(), vec![URL.to_string()]);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let inner = MockFetcher::new().with_page(URL, "<h1>Zendaya</h1>");
        let cached = CachedFetcher::new(inner, dir.path().to_path_buf(), Duration::ZERO);

        cached.fetch(URL).await.unwrap();
        cached.fetch(URL).await.unwrap();
        assert_eq!(cached.inner.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cached = CachedFetcher::new(
            MockFetcher::new(),
            dir.path().to_path_buf(),
            Duration::from_secs(3600),
        );

        assert!(cached.fetch(URL).await.is_err());
        assert!(cached.fetch(URL).await.is_err());
        assert_eq!(cached.inner.requests().len(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let inner = MockFetcher::new().with_page(URL, "fresh");
        let cached = CachedFetcher::new(inner, dir.path().to_path_buf(), Duration::from_secs(3600));

        std::fs::write(cached.entry_path(URL), "{not json").unwrap();
        assert_eq!(cached.fetch(URL).await.unwrap(), "fresh");

        // The broken entry was replaced by a good one
        assert_eq!(cached.lookup(URL).await.as_deref(), Some("fresh"));
    }
}
