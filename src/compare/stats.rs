// src/compare/stats.rs
// =============================================================================
// Per-sample statistics: gender distribution and age summary.
//
// Records are handled as loose JSON so files written by older runs (or by
// other tools) still load: gender may live under `gender_inferred`, `gender`
// or `sex`, and age may be a number, a string, or missing entirely.
// =============================================================================

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::profile::Gender;

static FEMALE_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(she|her|woman|female)\b").unwrap());
static MALE_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(he|his|him|man|male)\b").unwrap());
static AGE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,3}").unwrap());

const GENDER_KEYS: [&str; 3] = ["gender_inferred", "gender", "sex"];
const BIRTHDAY_KEYS: [&str; 3] = ["Birthday", "Birth Date", "Born"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
    pub unknown: usize,
}

impl GenderCounts {
    pub fn add(&mut self, gender: Gender) {
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Unknown => self.unknown += 1,
        }
    }

    pub fn get(&self, gender: Gender) -> usize {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Unknown => self.unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgeSummary {
    pub mean: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
    /// Sample standard deviation; needs at least two ages.
    pub stdev: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleStats {
    pub total: usize,
    pub genders: GenderCounts,
    pub ages: Vec<i64>,
    pub age: Option<AgeSummary>,
}

impl SampleStats {
    pub fn n_with_age(&self) -> usize {
        self.ages.len()
    }

    pub fn percent(&self, gender: Gender) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.genders.get(gender) as f64 / self.total as f64 * 100.0
        }
    }
}

/// Maps free-form gender values onto male / female / unknown.
pub fn normalize_gender(value: Option<&Value>) -> Gender {
    let s = match value {
        None | Some(Value::Null) => return Gender::Unknown,
        Some(Value::String(s)) => s.trim().to_lowercase(),
        Some(other) => other.to_string().trim().to_lowercase(),
    };

    match s.as_str() {
        "male" | "m" | "man" => Gender::Male,
        "female" | "f" | "woman" | "girl" => Gender::Female,
        "unknown" | "n/a" | "" => Gender::Unknown,
        _ if FEMALE_HINT.is_match(&s) => Gender::Female,
        _ if MALE_HINT.is_match(&s) => Gender::Male,
        _ => Gender::Unknown,
    }
}

/// Integer age from a number or a string like "32" / "32 yrs".
pub fn extract_age(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else if s.chars().all(|c| c.is_ascii_digit()) {
                s.parse().ok()
            } else {
                AGE_DIGITS.find(s).and_then(|m| m.as_str().parse().ok())
            }
        }
        _ => None,
    }
}

fn record_gender(record: &Value) -> Gender {
    // The first key that is present wins, even if its value is null
    normalize_gender(GENDER_KEYS.iter().find_map(|key| record.get(key)))
}

fn record_age(record: &Value) -> Option<i64> {
    if let Some(age) = extract_age(record.get("age")) {
        return Some(age);
    }

    // Birthday strings rarely contain an age; keep only plausible values
    let table = record.get("profile_table")?;
    let birthday = BIRTHDAY_KEYS.iter().find_map(|key| {
        table
            .get(key)
            .filter(|v| !v.is_null() && v.as_str() != Some(""))
    });
    extract_age(birthday).filter(|age| *age > 0 && *age < 120)
}

pub fn analyze(records: &[Value]) -> SampleStats {
    let mut genders = GenderCounts::default();
    let mut ages = Vec::new();

    for record in records {
        genders.add(record_gender(record));
        if let Some(age) = record_age(record) {
            ages.push(age);
        }
    }

    SampleStats {
        total: records.len(),
        genders,
        age: summarize_ages(&ages),
        ages,
    }
}

fn summarize_ages(ages: &[i64]) -> Option<AgeSummary> {
    if ages.is_empty() {
        return None;
    }

    let n = ages.len() as f64;
    let mean = ages.iter().sum::<i64>() as f64 / n;

    let mut sorted = ages.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    let stdev = (ages.len() >= 2).then(|| {
        let variance = ages
            .iter()
            .map(|&age| (age as f64 - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        variance.sqrt()
    });

    Some(AgeSummary {
        mean,
        median,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        stdev,
    })
}
