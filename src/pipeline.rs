// src/pipeline.rs
// =============================================================================
// Fetch-and-write: turn a list of slugs into JSONL profile records.
//
// For each slug, in order:
// 1. Fetch its profile page (a failure is logged and the slug skipped)
// 2. Extract a ProfileRecord
// 3. Append the record as one JSON line to the output file
// 4. Pause for the politeness delay
//
// The output file is the only shared resource and we are its only writer,
// so lines land in exactly the order the slugs were given.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::fetch::Session;
use crate::profile::{parse_profile, ProfileRecord};

/// Whether a run replaces the output file or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

// Fetches and extracts one profile; None if the page could not be fetched
pub async fn fetch_profile(session: &Session<'_>, slug: &str) -> Option<ProfileRecord> {
    let url = session.config.profile_url(slug);

    match session.fetcher.fetch(&url).await {
        Ok(html) => {
            let mut record = parse_profile(&html, &url);
            if record.slug.is_empty() {
                record.slug = slug.to_string();
            }
            Some(record)
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Failed to fetch profile");
            None
        }
    }
}

// Writes one JSON line per successfully fetched slug
//
// Parameters:
//   session: fetcher, URL config and politeness delay
//   slugs: profiles to fetch, in output order
//   out: destination file; parent directories are created as needed
//   mode: overwrite or append
//
// Returns: number of records written. Only file errors are fatal.
pub async fn write_profiles(
    session: &Session<'_>,
    slugs: &[String],
    out: &Path,
    mode: WriteMode,
) -> Result<usize> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Overwrite => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true).create(true),
    };
    let mut file = options
        .open(out)
        .await
        .with_context(|| format!("Failed to open {}", out.display()))?;

    let mut written = 0;
    for slug in slugs {
        if let Some(record) = fetch_profile(session, slug).await {
            let mut line = serde_json::to_string(&record)?;
            line.push('\n');
            file.write_all(line.as_bytes())
                .await
                .with_context(|| format!("Failed to write to {}", out.display()))?;
            written += 1;

            info!(
                slug = %record.slug,
                age = ?record.age,
                rels = ?record.relationships_total,
                partners = record.partners.len(),
                "Wrote record"
            );
        }

        session.politeness.pause().await;
    }

    file.flush().await?;
    info!(written, path = %out.display(), "Finished writing records");

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetch::Politeness;
    use crate::profile::Gender;
    use crate::testing::MockFetcher;

    fn slugs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn read_records(path: &Path) -> Vec<ProfileRecord> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_failed_fetches_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/deeper/sample.jsonl");
        let config = Config::default();
        let mock = MockFetcher::new()
            .with_profile(&config, "zendaya", &["tom-holland"])
            .with_profile(&config, "tom-holland", &["zendaya"]);
        let session = Session::new(&mock, &config, Politeness::none());

        let written = write_profiles(
            &session,
            &slugs(&["zendaya", "missing", "tom-holland"]),
            &out,
            WriteMode::Overwrite,
        )
        .await
        .unwrap();

        assert_eq!(written, 2);
        let records = read_records(&out);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].slug, "zendaya");
        assert_eq!(records[0].partners, vec!["tom-holland"]);
        assert_eq!(records[0].age, Some(30));
        assert_eq!(records[0].gender_inferred, Gender::Female);
        assert_eq!(records[1].slug, "tom-holland");
    }

    #[tokio::test]
    async fn test_append_and_overwrite_modes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sample.jsonl");
        let config = Config::default();
        let mock = MockFetcher::new().with_profile(&config, "zendaya", &[]);
        let session = Session::new(&mock, &config, Politeness::none());
        let one = slugs(&["zendaya"]);

        write_profiles(&session, &one, &out, WriteMode::Append).await.unwrap();
        write_profiles(&session, &one, &out, WriteMode::Append).await.unwrap();
        assert_eq!(read_records(&out).len(), 2);

        write_profiles(&session, &one, &out, WriteMode::Overwrite).await.unwrap();
        assert_eq!(read_records(&out).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_still_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.jsonl");
        let config = Config::default();
        let mock = MockFetcher::new();
        let session = Session::new(&mock, &config, Politeness::none());

        let written = write_profiles(&session, &[], &out, WriteMode::Overwrite).await.unwrap();

        assert_eq!(written, 0);
        assert!(out.exists());
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_profile_uses_profile_url() {
        let config = Config::default();
        let mock = MockFetcher::new().with_profile(&config, "adele", &[]);
        let session = Session::new(&mock, &config, Politeness::none());

        let record = fetch_profile(&session, "adele").await.unwrap();
        assert_eq!(record.url, "https://www.whosdatedwho.com/dating/adele");
        assert_eq!(record.name, "adele");
        assert!(fetch_profile(&session, "nobody").await.is_none());
    }

    #[tokio::test]
    async fn test_non_ascii_slug_round_trips_into_record() {
        let config = Config::default();
        let mock = MockFetcher::new().with_profile(&config, "beyoncé", &["jay-z"]);
        let session = Session::new(&mock, &config, Politeness::none());

        let record = fetch_profile(&session, "beyoncé").await.unwrap();
        assert_eq!(record.slug, "beyoncé");
        assert_eq!(record.url, "https://www.whosdatedwho.com/dating/beyonc%C3%A9");
    }
}
