// src/crawl/snowball.rs
// =============================================================================
// Snowball sampling: a breadth-first walk over the relationship graph.
//
// How it works:
// 1. Start with the seed slug in a queue
// 2. Pop the front slug; skip it if already visited, otherwise mark visited
// 3. Fetch its profile page and extract its partners
// 4. Collect the slug and enqueue partners we haven't seen in any form
// 5. Repeat until we've collected `target` slugs or the queue runs dry
//
// A page that fails to fetch is still visited, but it is not collected and
// adds nothing to the frontier. If the seed itself fails, the walk ends
// immediately with nothing collected.
//
// Rust concepts:
// - VecDeque: FIFO frontier, push_back / pop_front
// - HashSet: O(1) "have we seen this slug" checks
// =============================================================================

use std::collections::{HashSet, VecDeque};
use tracing::{info, warn};

use crate::fetch::Session;
use crate::profile::parse_profile;

// State of one traversal. Lives for a single snowball_sample call.
#[derive(Debug, Default)]
struct Traversal {
    visited: HashSet<String>,
    queue: VecDeque<String>,
    // Same members as `queue`, for constant-time membership checks
    queued: HashSet<String>,
    collected: Vec<String>,
    collected_set: HashSet<String>,
}

impl Traversal {
    fn new(seed: &str) -> Self {
        let mut state = Self::default();
        state.queued.insert(seed.to_string());
        state.queue.push_back(seed.to_string());
        state
    }

    fn is_done(&self, target: usize) -> bool {
        self.queue.is_empty() || self.collected.len() >= target
    }

    // Pops the front of the queue and marks it visited. Returns None when
    // the slug was already visited; the caller re-checks the loop condition.
    fn dequeue(&mut self) -> Option<String> {
        let current = self.queue.pop_front()?;
        self.queued.remove(&current);

        if !self.visited.insert(current.clone()) {
            return None;
        }
        Some(current)
    }

    // Records a successfully fetched slug and grows the frontier from its
    // partners. Returns how many partners were enqueued.
    fn collect(&mut self, current: String, partners: Vec<String>) -> usize {
        if self.collected_set.insert(current.clone()) {
            self.collected.push(current);
        }

        let mut added = 0;
        for partner in partners {
            // Checked in this order: visited, queued, collected
            if self.visited.contains(&partner)
                || self.queued.contains(&partner)
                || self.collected_set.contains(&partner)
            {
                continue;
            }
            self.queued.insert(partner.clone());
            self.queue.push_back(partner);
            added += 1;
        }
        added
    }

    fn into_sample(mut self, target: usize) -> Vec<String> {
        self.collected.truncate(target);
        self.collected
    }
}

// Collects up to `target` slugs breadth-first from `seed`
//
// Parameters:
//   session: fetcher, URL config and politeness delay
//   seed: starting slug (already normalised)
//   target: how many slugs we want
//
// Returns: collected slugs in discovery order, never more than `target`
pub async fn snowball_sample(session: &Session<'_>, seed: &str, target: usize) -> Vec<String> {
    info!(seed, target, "Starting BFS");

    let mut state = Traversal::new(seed);

    while !state.is_done(target) {
        let Some(current) = state.dequeue() else {
            continue;
        };

        let url = session.config.profile_url(&current);
        let html = match session.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch profile");
                session.politeness.pause().await;
                continue;
            }
        };

        let partners = parse_profile(&html, &url).partners;
        info!(slug = %current, partners = partners.len(), "Discovered partners");

        state.collect(current, partners);
        info!(
            collected = state.collected.len(),
            target,
            queue = state.queue.len(),
            "Progress"
        );

        session.politeness.pause().await;
    }

    if state.collected.len() < target {
        info!(
            collected = state.collected.len(),
            target,
            "Queue exhausted before reaching target"
        );
    } else {
        info!(target, "Reached target sample size");
    }

    state.into_sample(target)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why both `queue` and `queued`?
//    - VecDeque keeps FIFO order but `contains` is a linear scan
//    - The HashSet mirror answers "already queued?" in O(1)
//    - Every push_back/pop_front updates both
//
// 2. Why does a failed fetch still count as visited?
//    - We never retry; marking it visited stops a partner link from
//      queueing the same broken page again
//
// 3. Memory:
//    - `visited` and the queue grow with the reachable graph; the target
//      size is the only bound. Fine for sample sizes in the hundreds.
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetch::Politeness;
    use crate::testing::MockFetcher;

    // Builds a graph of profile pages: (slug, partners). Slugs listed only
    // as partners have no page and fail with 404.
    fn graph(config: &Config, nodes: &[(&str, &[&str])]) -> MockFetcher {
        nodes
            .iter()
            .fold(MockFetcher::new(), |mock, (slug, partners)| {
                mock.with_profile(config, slug, partners)
            })
    }

    fn requested_slugs(mock: &MockFetcher) -> Vec<String> {
        mock.requests()
            .iter()
            .filter_map(|url| crate::slug::resolve(url))
            .collect()
    }

    async fn run(mock: &MockFetcher, config: &Config, seed: &str, target: usize) -> Vec<String> {
        let session = Session::new(mock, config, Politeness::none());
        snowball_sample(&session, seed, target).await
    }

    #[tokio::test]
    async fn test_failed_node_is_visited_but_not_collected() {
        let config = Config::default();
        let mock = graph(&config, &[("a", &["b", "c"]), ("b", &["c", "d"]), ("c", &[])]);

        let sample = run(&mock, &config, "a", 4).await;

        assert_eq!(sample, vec!["a", "b", "c"]);
        assert_eq!(requested_slugs(&mock), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_failing_seed_exhausts_immediately() {
        let config = Config::default();
        let mock = MockFetcher::new();

        let sample = run(&mock, &config, "nobody", 10).await;

        assert!(sample.is_empty());
        assert_eq!(mock.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_stops_at_target() {
        let config = Config::default();
        let mock = graph(
            &config,
            &[("a", &["b", "c", "d"]), ("b", &["e"]), ("c", &["f"]), ("d", &[])],
        );

        let sample = run(&mock, &config, "a", 3).await;

        assert_eq!(sample, vec!["a", "b", "c"]);
        assert_eq!(requested_slugs(&mock), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let config = Config::default();
        let mock = graph(
            &config,
            &[
                ("a", &["b", "c"]),
                ("b", &["d"]),
                ("c", &["e"]),
                ("d", &["f"]),
                ("e", &[]),
                ("f", &[]),
            ],
        );

        let sample = run(&mock, &config, "a", 5).await;

        // Distance 0: a, distance 1: b c, distance 2: d e; f (distance 3) is cut
        assert_eq!(sample, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_cycles_never_duplicate() {
        let config = Config::default();
        let mock = graph(&config, &[("a", &["b"]), ("b", &["a", "c"]), ("c", &["a", "b"])]);

        let sample = run(&mock, &config, "a", 10).await;

        assert_eq!(sample, vec!["a", "b", "c"]);
        let unique: HashSet<_> = sample.iter().collect();
        assert_eq!(unique.len(), sample.len());
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_couple_pages_are_not_followed() {
        let config = Config::default();
        let mock = graph(&config, &[("a", &["a-and-b", "celebrity-couples", "b"]), ("b", &[])]);

        let sample = run(&mock, &config, "a", 5).await;

        assert_eq!(sample, vec!["a", "b"]);
        assert_eq!(requested_slugs(&mock), vec!["a", "b"]);
    }

    #[test]
    fn test_frontier_skips_known_slugs() {
        let mut state = Traversal::new("a");
        let a = state.dequeue().unwrap();
        assert_eq!(state.collect(a, vec!["b".into(), "c".into(), "a".into(), "b".into()]), 2);

        let b = state.dequeue().unwrap();
        // "a" visited, "c" queued, "b" itself visited
        assert_eq!(state.collect(b, vec!["a".into(), "c".into(), "b".into(), "d".into()]), 1);

        assert_eq!(state.queue, VecDeque::from(vec!["c".to_string(), "d".to_string()]));
        assert!(state.queue.iter().all(|slug| !state.visited.contains(slug)));
        assert_eq!(state.collected, vec!["a", "b"]);
    }

    #[test]
    fn test_dequeue_discards_visited() {
        let mut state = Traversal::new("a");
        state.visited.insert("a".to_string());
        assert_eq!(state.dequeue(), None);
        assert!(state.queue.is_empty());
    }

    #[test]
    fn test_sample_is_truncated_to_target() {
        let mut state = Traversal::default();
        for slug in ["a", "b", "c"] {
            state.collect(slug.to_string(), Vec::new());
        }
        assert_eq!(state.into_sample(2), vec!["a", "b"]);
    }
}
