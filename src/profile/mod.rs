// src/profile/mod.rs
// =============================================================================
// Profile records and the HTML extraction that produces them.
//
// Submodules:
// - record: the ProfileRecord written as one JSON line per person
// - extract: best-effort field extractors over a parsed profile page
//
// Every extractor degrades to "absent" on its own; a page with none of the
// expected markup still yields a record (name falls back to the slug).
// =============================================================================

mod extract;
mod record;

pub use extract::{extract_listing_slugs, parse_profile};
pub use record::{Gender, ProfileRecord};
