// src/compare/mod.rs
// =============================================================================
// Compares a snowball sample with an alphabetical sample.
//
// Submodules:
// - stats: gender normalisation, age parsing, summary statistics
// - report: console summary and markdown report
//
// Input files are JSONL. A malformed line is skipped with a warning; the
// rest of the file is still read.
// =============================================================================

mod report;
mod stats;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

use report::{print_summary, render_report};
use stats::analyze;

/// Reads one JSON object per non-blank line, skipping lines that don't parse.
pub fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) if value.is_object() => records.push(value),
            Ok(_) => warn!(path = %path.display(), line = index + 1, "Skipping non-object JSON line"),
            Err(e) => warn!(path = %path.display(), line = index + 1, error = %e, "Failed to parse JSON line"),
        }
    }

    Ok(records)
}

// Reads both samples, prints their summaries and writes the markdown report
pub fn run_comparison(snow: &Path, alpha: &Path, out: &Path) -> Result<()> {
    let snow_stats = analyze(&read_jsonl(snow)?);
    let alpha_stats = analyze(&read_jsonl(alpha)?);

    print_summary("Snowball", &snow_stats);
    print_summary("Alphabet", &alpha_stats);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(out, render_report(&snow_stats, &alpha_stats))
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!("Wrote comparison markdown to {}", out.display());
    Ok(())
}
