// src/profile/extract.rs
// =============================================================================
// Field extractors for profile and listing pages.
//
// Each field has its own small extractor that returns Option (or an empty
// collection). Fallbacks are chained with or_else, so the first extractor
// that finds something wins and a missing element never aborts the record.
//
// Markup we rely on:
//   <h1>, <title>, .ff-title                 name
//   .ff-fact-box.small.age .fact             age
//   .ff-fact-box.small.relationships .fact   relationship count
//   p.ff-auto-about                          about text (gender heuristic)
//   #ff-dating-history (and fallbacks)       partner links
//   <table> containing "First Name"          raw attribute table
// =============================================================================

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use super::record::{Gender, ProfileRecord};
use crate::slug;

static TITLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*-\s*Who['’]s Dated Who.*$").unwrap());
static FEMALE_PRONOUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(she|her)\b").unwrap());
static MALE_PRONOUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(he|his)\b").unwrap());
static ACTRESS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bactress\b").unwrap());
static ACTOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bactor\b").unwrap());

const AGE_FACT: &str = ".ff-fact-box.small.age .fact";
const RELATIONSHIPS_FACT: &str = ".ff-fact-box.small.relationships .fact";
const ABOUT: &str = "p.ff-auto-about";
const HISTORY_CLASS_MARKERS: [&str; 3] = ["ff-dating-history", "ff-grid", "dating-history"];

// Parses a fetched profile page into a record
//
// Parameters:
//   html: raw page body
//   url: the address it was fetched from (source of the slug)
pub fn parse_profile(html: &str, url: &str) -> ProfileRecord {
    let document = Html::parse_document(html);
    extract_profile(&document, url)
}

fn extract_profile(document: &Html, url: &str) -> ProfileRecord {
    let slug = slug::resolve(url);

    ProfileRecord {
        name: extract_name(document, slug.as_deref()),
        slug: slug.unwrap_or_default(),
        url: url.to_string(),
        age: extract_fact(document, AGE_FACT),
        relationships_total: extract_fact(document, RELATIONSHIPS_FACT),
        gender_inferred: extract_gender(document),
        partners: extract_partners(document),
        profile_table: extract_profile_table(document),
    }
}

/// Individual slugs linked from an alphabetical listing page, in page order.
/// Not deduplicated; the caller tracks what it has already seen.
pub fn extract_listing_slugs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let grid = select_first(&document, ".ff-box-grid");
    match grid {
        Some(grid) => individual_slugs(grid.select(&selector("ul li a[href]"))),
        None => individual_slugs(document.select(&selector(
            ".ff-grid-box.ff-list a[href], .ff-box-grid a[href], .ff-list a[href]",
        ))),
    }
}

// Our selectors are constants and known to be valid, so a parse failure
// is a programmer error
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    document.select(&selector(css)).next()
}

// Text content with runs of whitespace collapsed to single spaces
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn extract_name(document: &Html, slug: Option<&str>) -> String {
    select_first(document, "h1")
        .map(text_of)
        .and_then(non_empty)
        .or_else(|| {
            select_first(document, "title")
                .map(|title| TITLE_SUFFIX.replace(&text_of(title), "").trim().to_string())
                .and_then(non_empty)
        })
        .or_else(|| {
            select_first(document, ".ff-profile .ff-title, .ff-title")
                .map(text_of)
                .and_then(non_empty)
        })
        .or_else(|| slug.map(slug::title_case).and_then(non_empty))
        .unwrap_or_else(|| "unknown".to_string())
}

fn extract_fact(document: &Html, css: &str) -> Option<u32> {
    select_first(document, css)
        .map(text_of)
        .and_then(|text| first_number(&text))
}

/// First run of ASCII digits in `text`: "32" -> 32, "Age: unknown" -> None.
pub(crate) fn first_number(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn extract_gender(document: &Html) -> Gender {
    select_first(document, ABOUT)
        .map(|p| infer_gender(&text_of(p)))
        .unwrap_or_default()
}

/// Guesses gender from an about paragraph. Pronouns are checked before
/// occupation words, so "she ... actor" is female.
pub(crate) fn infer_gender(about: &str) -> Gender {
    let text = about.to_lowercase();

    if FEMALE_PRONOUN.is_match(&text) {
        Gender::Female
    } else if MALE_PRONOUN.is_match(&text) {
        Gender::Male
    } else if ACTRESS.is_match(&text) {
        Gender::Female
    } else if ACTOR.is_match(&text) {
        Gender::Male
    } else {
        Gender::Unknown
    }
}

// The dating-history container, tried in order: primary id, grid id,
// then the first element carrying a history-like class
fn dating_history(document: &Html) -> Option<ElementRef<'_>> {
    select_first(document, "#ff-dating-history")
        .or_else(|| select_first(document, "#ff-dating-history-grid"))
        .or_else(|| {
            document.select(&selector("[class]")).find(|el| {
                el.value()
                    .classes()
                    .any(|class| HISTORY_CLASS_MARKERS.iter().any(|m| class.contains(m)))
            })
        })
}

fn extract_partners(document: &Html) -> Vec<String> {
    let Some(container) = dating_history(document) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    individual_slugs(container.select(&selector("a[href]")))
        .into_iter()
        .filter(|slug| seen.insert(slug.clone()))
        .collect()
}

fn individual_slugs<'a>(anchors: impl Iterator<Item = ElementRef<'a>>) -> Vec<String> {
    anchors
        .filter_map(|a| a.value().attr("href"))
        .filter_map(slug::resolve)
        .filter(|s| slug::is_individual(s))
        .collect()
}

fn extract_profile_table(document: &Html) -> BTreeMap<String, String> {
    let mut data = BTreeMap::new();

    let table = document
        .select(&selector("table"))
        .find(|t| t.text().any(|s| s.to_lowercase().contains("first name")));
    let Some(table) = table else {
        return data;
    };

    let cell = selector("td, th");
    for row in table.select(&selector("tr")) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell).collect();
        if cells.len() < 2 {
            continue;
        }
        let key = text_of(cells[0]);
        if !key.is_empty() {
            data.insert(key, text_of(cells[1]));
        }
    }

    data
}
