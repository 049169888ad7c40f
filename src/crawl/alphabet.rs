// src/crawl/alphabet.rs
// =============================================================================
// Alphabetical sampling: the first K individuals from each letter's
// "popular" listing page, a through z.
//
// A slug already taken under an earlier letter is skipped, so the combined
// sample has no duplicates. A listing page that fails to load contributes
// nothing; the other letters carry on.
// =============================================================================

use std::collections::HashSet;
use tracing::{info, warn};

use crate::fetch::Session;
use crate::profile::extract_listing_slugs;

// Fetches one letter's listing and returns up to `count` new individual slugs
//
// `seen` is shared across letters; every returned slug is added to it.
pub async fn fetch_letter_slugs(
    session: &Session<'_>,
    letter: char,
    count: usize,
    seen: &mut HashSet<String>,
) -> Vec<String> {
    let url = session.config.letter_url(letter);

    let html = match session.fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(url = %url, error = %e, "Failed to fetch letter page");
            session.politeness.pause().await;
            return Vec::new();
        }
    };

    let mut slugs = Vec::new();
    for slug in extract_listing_slugs(&html) {
        if slugs.len() >= count {
            break;
        }
        if seen.insert(slug.clone()) {
            slugs.push(slug);
        }
    }

    let letter = letter.to_ascii_uppercase();
    if slugs.len() < count {
        info!(%letter, found = slugs.len(), requested = count, "Only found part of the requested slugs");
    } else {
        info!(%letter, collected = slugs.len(), "Collected slugs");
    }

    session.politeness.pause().await;
    slugs
}

/// Walks every letter a..=z and returns the combined, deduplicated sample.
pub async fn alphabet_sample(session: &Session<'_>, count: usize) -> Vec<String> {
    info!(per_letter = count, letters = 26, "Collecting alphabetical sample");

    let mut seen = HashSet::new();
    let mut all = Vec::new();

    for letter in 'a'..='z' {
        let slugs = fetch_letter_slugs(session, letter, count, &mut seen).await;
        all.extend(slugs);
        info!(total = all.len(), "Total collected so far");
    }

    all
}
