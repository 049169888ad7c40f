// src/profile/record.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Gender as guessed from page text. Never authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unknown];

    /// Capitalised label used in reports ("Male", "Female", "Unknown").
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One scraped profile; serialised as a single JSONL line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub slug: String,
    pub url: String,
    pub name: String,
    pub age: Option<u32>,
    pub relationships_total: Option<u32>,
    pub gender_inferred: Gender,
    /// Outgoing edges of the relationship graph, in page order.
    pub partners: Vec<String>,
    /// Raw attribute table ("First Name" -> "Dylan", ...).
    pub profile_table: BTreeMap<String, String>,
}
