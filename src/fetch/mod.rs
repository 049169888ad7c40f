// src/fetch/mod.rs
// =============================================================================
// This module owns everything between "I want this URL" and "here is the HTML".
//
// Submodules:
// - http: the real reqwest client (user agent, timeout, status checks)
// - cache: an on-disk response cache wrapping any fetcher
// - politeness: the randomized pause inserted after every request
//
// Collectors never build their own client. They receive a `Session`, which
// borrows an injected `PageFetcher`, so tests can substitute a fake.
// =============================================================================

mod cache;
mod http;
mod politeness;

pub use cache::CachedFetcher;
pub use http::HttpFetcher;
pub use politeness::Politeness;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::config::Config;

/// Why a page could not be fetched. Callers log it and move on.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Something that can turn a URL into a page body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

// Builds the transport for one process run
//
// Creates the cache directory if needed; calling it twice is harmless.
// With `use_cache` off every request goes straight to the network.
pub fn configure_transport(config: &Config, use_cache: bool) -> Result<Box<dyn PageFetcher>> {
    let http = HttpFetcher::new(config)?;

    if !use_cache {
        info!("Response cache disabled");
        return Ok(Box::new(http));
    }

    let cache_dir = config.cache_dir();
    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
    info!(
        path = %cache_dir.display(),
        expire_secs = config.cache_ttl.as_secs(),
        "Response cache installed"
    );

    Ok(Box::new(CachedFetcher::new(http, cache_dir, config.cache_ttl)))
}

/// Everything a collector needs to talk to the site.
pub struct Session<'a> {
    pub fetcher: &'a dyn PageFetcher,
    pub config: &'a Config,
    pub politeness: Politeness,
}

impl<'a> Session<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, config: &'a Config, politeness: Politeness) -> Self {
        Self {
            fetcher,
            config,
            politeness,
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a trait for fetching?
//    - Collectors only need "URL in, HTML out"
//    - Tests pass an in-memory MockFetcher; production passes the cached
//      HTTP client. Neither side knows which one it got.
//
// 2. Why #[async_trait]?
//    - We store fetchers as `Box<dyn PageFetcher>` and pass `&dyn PageFetcher`
//    - async_trait boxes the returned future so the trait stays object-safe
//
// 3. Why Box<dyn PageFetcher> from configure_transport?
//    - With or without the cache the caller gets the same type back
//    - CachedFetcher<HttpFetcher> and HttpFetcher are different types
// -----------------------------------------------------------------------------
