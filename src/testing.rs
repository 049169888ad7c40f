// src/testing.rs
// =============================================================================
// Test doubles shared by the unit tests: an in-memory fetcher and small HTML
// builders, so traversal and pipeline tests run without network.
// =============================================================================

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::config::Config;
use crate::fetch::{FetchError, PageFetcher};

/// Serves canned bodies by URL; anything unknown is an HTTP 404.
/// Records every requested URL in order.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Registers a profile page for `slug` linking to `partners`.
    pub fn with_profile(self, config: &Config, slug: &str, partners: &[&str]) -> Self {
        let url = config.profile_url(slug);
        self.with_page(&url, &profile_page(slug, partners))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Http {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// A minimal profile page with a heading, an about line and a dating history.
pub fn profile_page(slug: &str, partners: &[&str]) -> String {
    let links: String = partners
        .iter()
        .map(|p| format!(r#"<li><a href="/dating/{p}">{p}</a></li>"#))
        .collect();
    format!(
        r#"<html><head><title>{slug} - Who's Dated Who?</title></head>
           <body>
             <h1>{slug}</h1>
             <div class="ff-fact-box small age"><div class="fact">30</div></div>
             <p class="ff-auto-about">{slug} is an actress. She is famous.</p>
             <div id="ff-dating-history"><ul>{links}</ul></div>
           </body></html>"#
    )
}

/// A minimal alphabetical listing page.
pub fn listing_page(slugs: &[&str]) -> String {
    let items: String = slugs
        .iter()
        .map(|s| format!(r#"<li><a href="/dating/{s}">{s}</a></li>"#))
        .collect();
    format!(r#"<html><body><div class="ff-box-grid"><ul>{items}</ul></div></body></html>"#)
}
