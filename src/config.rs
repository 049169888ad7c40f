// src/config.rs
// =============================================================================
// Runtime configuration shared by every subcommand.
//
// Values start from built-in defaults, are overridden by environment
// variables, and finally by the global CLI options (see main.rs).
//
// Environment variables:
//   CELEB_BASE_URL        site root (default https://www.whosdatedwho.com)
//   CELEB_DATA_DIR        where JSONL output and the cache live (default data)
//   CELEB_CACHE_TTL_SECS  how long a cached response stays fresh (default 1 day)
//   CELEB_USER_AGENT      client identifier sent with every request
// =============================================================================

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.whosdatedwho.com";

/// Path prefix of a profile page; the slug follows it.
pub const CELEB_PATH: &str = "/dating/";

/// Listing page for one letter of the alphabet.
pub const POPULAR_PATH: &str = "/popular?letter=";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const RATE_LIMIT_MIN: Duration = Duration::from_millis(1000);
const RATE_LIMIT_MAX: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub data_dir: PathBuf,
    pub cache_ttl: Duration,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub rate_limit_min: Duration,
    pub rate_limit_max: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Constant and known to be valid
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cache_ttl: DEFAULT_CACHE_TTL,
            user_agent: default_user_agent(),
            request_timeout: DEFAULT_TIMEOUT,
            rate_limit_min: RATE_LIMIT_MIN,
            rate_limit_max: RATE_LIMIT_MAX,
        }
    }
}

impl Config {
    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Builds a config from any key lookup so tests don't touch the real env
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("CELEB_BASE_URL") {
            config.base_url = Url::parse(raw.trim())
                .with_context(|| format!("CELEB_BASE_URL is not a valid URL: '{}'", raw))?;
        }
        if let Some(dir) = lookup("CELEB_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("CELEB_CACHE_TTL_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("CELEB_CACHE_TTL_SECS must be a number of seconds, got '{}'", raw))?;
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(agent) = lookup("CELEB_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }

    /// Replaces the data directory (the `--data-dir` option).
    pub fn with_data_dir(mut self, dir: Option<&Path>) -> Self {
        if let Some(dir) = dir {
            self.data_dir = dir.to_path_buf();
        }
        self
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }

    /// Absolute URL of the profile page for `slug`.
    pub fn profile_url(&self, slug: &str) -> String {
        self.join(&format!("{}{}", CELEB_PATH, slug))
    }

    /// Absolute URL of the alphabetical listing page for `letter`.
    pub fn letter_url(&self, letter: char) -> String {
        self.join(&format!("{}{}", POPULAR_PATH, letter))
    }

    fn join(&self, path: &str) -> String {
        match self.base_url.join(path) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "{}/{} (+research scraper)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url.as_str(), "https://www.whosdatedwho.com/");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.cache_ttl, Duration::from_secs(86_400));
        assert!(config.user_agent.starts_with("celeb-sampler/"));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CELEB_BASE_URL", "http://localhost:8080"),
            ("CELEB_DATA_DIR", "/tmp/out"),
            ("CELEB_CACHE_TTL_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.profile_url("a"), "http://localhost:8080/dating/a");
        assert_eq!(config.cache_dir(), PathBuf::from("/tmp/out/cache"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_invalid_ttl_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("CELEB_CACHE_TTL_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_urls() {
        let config = Config::default();
        assert_eq!(
            config.profile_url("dylan-sprouse"),
            "https://www.whosdatedwho.com/dating/dylan-sprouse"
        );
        assert_eq!(
            config.letter_url('q'),
            "https://www.whosdatedwho.com/popular?letter=q"
        );
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config::default().with_data_dir(Some(Path::new("elsewhere")));
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
        let config = config.with_data_dir(None);
        assert_eq!(config.data_dir, PathBuf::from("elsewhere"));
    }
}
