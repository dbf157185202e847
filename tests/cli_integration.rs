//! CLI integration tests for membench-plot.
//!
//! Runs the binary against CSV fixtures in temp directories and inspects
//! the PDF it leaves behind.

#![allow(clippy::unwrap_used)] // Tests can use unwrap

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn membench_plot() -> Command {
    Command::cargo_bin("membench-plot").expect("Failed to find membench-plot binary")
}

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn page_count(path: &Path) -> usize {
    lopdf::Document::load(path).unwrap().get_pages().len()
}

const SMALL_RUN: &str = "size,stride,time\n1024,4,2.1\n1024,8,-1\n2048,4,3.0\n";

// ============================================================================
// Single-column mode
// ============================================================================

#[test]
fn test_single_column_writes_pdf_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "membench.csv", SMALL_RUN);

    membench_plot()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Groups"))
        .stdout(predicate::str::contains("membench.pdf"));

    let output = dir.path().join("membench.pdf");
    assert!(fs::metadata(&output).unwrap().len() > 0);
    assert_eq!(page_count(&output), 1);
}

#[test]
fn test_default_input_in_working_directory() {
    let dir = TempDir::new().unwrap();
    write_csv(&dir, "membench.csv", SMALL_RUN);

    membench_plot().current_dir(dir.path()).assert().success();

    assert!(dir.path().join("membench.pdf").exists());
}

#[test]
fn test_output_override() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "run.csv", SMALL_RUN);
    let output = dir.path().join("chart.pdf");

    membench_plot()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
    assert!(!dir.path().join("run.pdf").exists());
}

#[test]
fn test_named_measurement_column() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(
        &dir,
        "run.csv",
        "size,stride,time,latency\n64,4,1,5\n64,8,2,6\n",
    );

    membench_plot()
        .arg(&input)
        .args(["--column", "latency", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"column\": \"latency\""));
}

// ============================================================================
// Multi-column mode
// ============================================================================

#[test]
fn test_all_columns_one_page_per_measurement() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(
        &dir,
        "multi.csv",
        "size,stride,load,store,copy,scan\n\
         4096,8,1.0,2.0,3.0,4.0\n\
         4096,64,1.5,2.5,3.5,4.5\n\
         65536,8,2.0,3.0,4.0,5.0\n\
         65536,64,2.5,3.5,4.5,5.5\n",
    );

    membench_plot()
        .arg(&input)
        .arg("--all-columns")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 page(s)"));

    assert_eq!(page_count(&dir.path().join("multi.pdf")), 4);
}

#[test]
fn test_all_columns_needs_a_measurement() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "narrow.csv", "size,stride\n64,4\n");

    membench_plot()
        .arg(&input)
        .arg("--all-columns")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("measurement"));
}

// ============================================================================
// JSON summary
// ============================================================================

#[test]
fn test_json_summary() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "membench.csv", SMALL_RUN);

    let assert = membench_plot().arg(&input).arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(summary["rows"], 3);
    assert_eq!(summary["cells_nullified"], 1);
    assert_eq!(summary["pages"][0]["column"], "time");
    assert_eq!(summary["pages"][0]["groups"], 2);
    assert_eq!(summary["pages"][0]["min_value"], 2.1);
    assert!(summary["bytes"].as_u64().unwrap() > 0);
}

// ============================================================================
// Failures and exit codes
// ============================================================================

#[test]
fn test_missing_input_exit_code() {
    let dir = TempDir::new().unwrap();

    membench_plot()
        .arg(dir.path().join("absent.csv"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("[ERROR]"));
}

#[test]
fn test_missing_time_column_exit_code() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "run.csv", "size,stride,latency\n64,4,1\n");

    membench_plot()
        .arg(&input)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("time"));
}

#[test]
fn test_malformed_cell_exit_code() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "run.csv", "size,stride,time\n64,4,fast\n");

    membench_plot()
        .arg(&input)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_infinite_cell_exit_code() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "run.csv", "size,stride,time\n64,4,inf\n64,8,1\n");

    membench_plot()
        .arg(&input)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("'inf' is not a finite number"));

    assert!(!dir.path().join("run.pdf").exists());
}

#[test]
fn test_all_negative_is_empty_data() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "run.csv", "size,stride,time\n64,4,-1\n64,8,-2\n");

    membench_plot().arg(&input).assert().code(5);

    assert!(!dir.path().join("run.pdf").exists());
}

#[test]
fn test_unwritable_output_exit_code() {
    let dir = TempDir::new().unwrap();
    let input = write_csv(&dir, "run.csv", SMALL_RUN);

    membench_plot()
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("no-such-dir").join("out.pdf"))
        .assert()
        .code(7);
}

#[test]
fn test_bad_cache_size_rejected() {
    membench_plot()
        .args(["--cache-sizes", "32K,huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("huge"));
}

#[test]
fn test_help() {
    membench_plot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--all-columns"))
        .stdout(predicate::str::contains("--cache-sizes"));
}
