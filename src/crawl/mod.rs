// src/crawl/mod.rs
// =============================================================================
// This module decides WHICH profiles end up in a sample.
//
// Two strategies:
// - snowball: breadth-first walk over the dating-history graph from a seed
// - alphabet: the first K individuals from each letter's listing page
//
// Both return slugs only; fetching and writing full records is the
// pipeline's job.
//
// Rust concepts:
// - Collections: HashSet for seen slugs, VecDeque for the BFS frontier
// - Async: every fetch is awaited in turn, one request at a time
// =============================================================================

mod alphabet;
mod snowball;

pub use alphabet::alphabet_sample;
pub use snowball::snowball_sample;
