// src/compare/report.rs
// =============================================================================
// Human-readable output for a comparison: a console summary per sample and
// the markdown report (Gender, Age, Notes sections).
// =============================================================================

use super::stats::SampleStats;
use crate::profile::Gender;

pub fn gender_table(stats: &SampleStats) -> String {
    let mut lines = vec![
        "| Gender | Count | Percent |".to_string(),
        "|---:|---:|---:|".to_string(),
    ];
    for gender in Gender::ALL {
        lines.push(format!(
            "| {} | {} | {:.1}% |",
            gender.label(),
            stats.genders.get(gender),
            stats.percent(gender)
        ));
    }
    lines.join("\n")
}

pub fn age_table(stats: &SampleStats) -> String {
    let Some(age) = &stats.age else {
        return "No age data available in this sample.".to_string();
    };

    let mut lines = vec![
        "| Metric | Value |".to_string(),
        "|---|---:|".to_string(),
        format!("| Records with age | {} |", stats.n_with_age()),
        format!("| Mean age | {:.2} |", age.mean),
        format!("| Median age | {:.2} |", age.median),
    ];
    if let Some(stdev) = age.stdev {
        lines.push(format!("| Age stdev | {:.2} |", stdev));
    }
    lines.push(format!("| Min age | {} |", age.min));
    lines.push(format!("| Max age | {} |", age.max));
    lines.join("\n")
}

pub fn render_report(snow: &SampleStats, alpha: &SampleStats) -> String {
    let sections = [
        "# Comparison of Samples".to_string(),
        "## Gender".to_string(),
        format!("### Snowball sample (total records: {})", snow.total),
        gender_table(snow),
        format!("### Alphabet sample (total records: {})", alpha.total),
        gender_table(alpha),
        "## Age".to_string(),
        format!("### Snowball sample (n with age: {})", snow.n_with_age()),
        age_table(snow),
        format!("### Alphabet sample (n with age: {})", alpha.n_with_age()),
        age_table(alpha),
        "## Notes".to_string(),
        [
            "- Gender is inferred using the `gender_inferred` field when present. Values were normalized to 'male', 'female', or 'unknown'.",
            "- Age is taken from the `age` field when available; records without a parseable age were excluded from the age statistics.",
            "- If a sample has few or no age values, mean/stdev may be unavailable.",
        ]
        .join("\n"),
    ];

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}

pub fn print_summary(name: &str, stats: &SampleStats) {
    println!("{}", "=".repeat(60));
    println!("Sample: {}", name);
    println!("Total records: {}", stats.total);
    println!("Gender distribution:");
    for gender in Gender::ALL {
        println!(
            "  {:<7}: {:>4} ({:>5.1}%)",
            gender.label(),
            stats.genders.get(gender),
            stats.percent(gender)
        );
    }
    println!("Age summary (records with age):");
    match &stats.age {
        None => println!("  No age data found."),
        Some(age) => {
            let stdev = age
                .stdev
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "NA".to_string());
            println!(
                "  n={}  mean={:.2}  median={:.2}  std={}",
                stats.n_with_age(),
                age.mean,
                age.median,
                stdev
            );
        }
    }
    println!();
}
