// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
//   celeb-sampler snowball <start_slug> <target_num> [--out PATH]
//   celeb-sampler alphabet <number_per_letter> [--out PATH]
//   celeb-sampler compare --snow PATH --alpha PATH [--out PATH]
//
// Argument validation (positive counts, non-empty seed) happens here, so a
// bad invocation fails before any request is made.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::slug;

#[derive(Parser, Debug)]
#[command(
    name = "celeb-sampler",
    version,
    about = "Sample celebrity dating profiles two ways and compare the samples",
    long_about = "celeb-sampler collects public celebrity relationship profiles either by \
                  snowball sampling (breadth-first over dating histories) or alphabetically \
                  (the first N people per letter), writes them as JSONL, and compares the \
                  gender and age distributions of two samples."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for default output files and the response cache
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Always hit the network instead of the on-disk response cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Skip the politeness delay between requests (only sensible with a warm cache)
    #[arg(long, global = true)]
    pub no_delay: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Snowball-sample profiles breadth-first from a starting celebrity
    ///
    /// Example: celeb-sampler snowball barbara-palvin 130
    Snowball {
        /// Starting celebrity slug, e.g. barbara-palvin ("Barbara Palvin" also works)
        #[arg(value_parser = parse_start_slug)]
        start_slug: String,

        /// Number of celebrities to collect
        #[arg(value_parser = parse_count)]
        target_num: usize,

        /// Output JSONL path (default: <data-dir>/<start_slug>_snowball.jsonl)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Collect the first N celebrities from each letter's listing page
    ///
    /// Example: celeb-sampler alphabet 5
    Alphabet {
        /// Number of celebrities to collect per letter
        #[arg(value_parser = parse_count)]
        number_per_letter: usize,

        /// Output JSONL path (default: <data-dir>/alphabet_<n>.jsonl)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Compare a snowball sample with an alphabetical sample
    Compare {
        /// Snowball JSONL file
        #[arg(long)]
        snow: PathBuf,

        /// Alphabetical JSONL file
        #[arg(long)]
        alpha: PathBuf,

        /// Output markdown report
        #[arg(long, default_value = "Comparison.md")]
        out: PathBuf,
    },
}

fn parse_count(raw: &str) -> Result<usize, String> {
    let n: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", raw))?;
    if n == 0 {
        return Err("must be > 0".to_string());
    }
    Ok(n)
}

fn parse_start_slug(raw: &str) -> Result<String, String> {
    let slug = slug::normalize(raw);
    if slug.is_empty() {
        return Err("start slug must not be empty".to_string());
    }
    Ok(slug)
}
