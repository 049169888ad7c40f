// src/slug.rs
// =============================================================================
// Turns links into profile slugs and decides which slugs name one person.
//
// A slug is the last meaningful path segment of a profile link:
//   /dating/dylan-sprouse                           -> dylan-sprouse
//   https://www.whosdatedwho.com/dating/zendaya     -> zendaya
//   /dating/ariana-grande-and-dalton-gomez          -> a couple page (filtered)
//
// Rust concepts:
// - Option<String>: "maybe a slug"; None instead of an empty string
// - Iterators: split/filter/collect over path segments
// =============================================================================

use url::Url;

/// First path segment of profile links.
const PROFILE_SEGMENT: &str = "dating";

// Resolves an href (relative or absolute) to a slug
//
// Returns None for empty input or a link with no path segments.
// Never returns Some("").
pub fn resolve(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    // Absolute URLs: keep only the path. Relative hrefs fail to parse
    // on their own, so drop any query string or fragment by hand.
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segments: Vec<&str> = path
        .trim_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let slug = match segments.as_slice() {
        [] => return None,
        [first, second, ..] if first.eq_ignore_ascii_case(PROFILE_SEGMENT) => *second,
        [.., last] => *last,
    };

    // Url::parse percent-encodes the path while a relative href stays raw;
    // decode so both spell the same identifier
    Some(decode_segment(slug))
}

fn decode_segment(segment: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
}

/// Heuristic: does this slug name a single person rather than a couple?
///
/// Rejects the `-and-` pairing infix (and `and-`/`-and` at either end) and
/// anything mentioning "couple". False positives are accepted.
pub fn is_individual(slug: &str) -> bool {
    if slug.is_empty() {
        return false;
    }
    let s = slug.to_lowercase();
    if s.contains("-and-") || s.starts_with("and-") || s.ends_with("-and") {
        return false;
    }
    !s.contains("couple")
}

/// Normalises a user-typed seed: "Barbara Palvin " -> "barbara-palvin".
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase().replace(' ', "-")
}

/// Display name fallback built from a slug: "dylan-sprouse" -> "Dylan Sprouse".
pub fn title_case(slug: &str) -> String {
    slug.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
