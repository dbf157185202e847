//! Terminal output: the run report and error lines.

use crate::error::Result;
use crate::pipeline::RunSummary;
use crate::PlotError;
use colored::Colorize;

/// Print a section header
pub fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "[PASS]".green().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Format bytes as human-readable size
#[must_use]
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Print the summary of a finished run, as a report or as JSON.
///
/// # Errors
/// Returns [`PlotError::InvalidConfig`] if the summary cannot be serialized.
pub fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(summary)
            .map_err(|e| PlotError::InvalidConfig(format!("JSON serialization failed: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    section("membench-plot");
    kv("Input", summary.input.display());
    kv("Rows", summary.rows);
    if summary.cells_nullified > 0 {
        warning(&format!(
            "{} negative cell(s) treated as missing",
            summary.cells_nullified
        ));
    }

    for (index, page) in summary.pages.iter().enumerate() {
        section(&format!("Page {}: {}", index + 1, page.column));
        kv("Groups", page.groups);
        kv("Points", page.points);
        kv("Min", format!("{} ns", crate::chart::annotate::round3(page.min_value)));
    }

    println!();
    success(&format!(
        "Wrote {} ({} page(s), {})",
        summary.output.display(),
        summary.pages.len(),
        format_size(summary.bytes)
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::SeriesSummary;
    use std::path::PathBuf;

    #[test]
    fn test_format_size() {
        assert!(format_size(512).contains("512"));
        assert!(format_size(1024).contains("KiB"));
        assert!(format_size(3 * 1024 * 1024).contains("MiB"));
    }

    #[test]
    fn test_summary_json_fields() {
        let summary = RunSummary {
            input: PathBuf::from("membench.csv"),
            output: PathBuf::from("membench.pdf"),
            rows: 3,
            cells_nullified: 1,
            pages: vec![SeriesSummary {
                column: "time".to_string(),
                groups: 2,
                points: 2,
                min_value: 2.1,
            }],
            bytes: 2048,
        };
        let value = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(value["output"], "membench.pdf");
        assert_eq!(value["pages"][0]["groups"], 2);
        assert_eq!(value["cells_nullified"], 1);
        assert!(print_summary(&summary, true).is_ok());
        assert!(print_summary(&summary, false).is_ok());
    }
}
