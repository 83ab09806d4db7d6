// Command-line frontend tests

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::*;
use tempfile::tempdir;

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_loadstats_analyze"))
        .args(args)
        .current_dir(cwd)
        .env_remove("LOADSTATS_CONFIG")
        .output()
        .expect("spawn loadstats_analyze")
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let tmp = tempdir().unwrap();
    let out = run(tmp.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Usage:"));
}

#[test]
fn test_too_many_directories_fails() {
    let tmp = tempdir().unwrap();
    let out = run(tmp.path(), &["a", "b", "c"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Usage:"));
}

#[test]
fn test_config_flag_without_path() {
    let tmp = tempdir().unwrap();
    let out = run(tmp.path(), &["results", "-c"]);
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("-c requires a config file path"));
    assert!(!err.contains("Unknown option"));
}

#[test]
fn test_unknown_option_fails() {
    let tmp = tempdir().unwrap();
    let out = run(tmp.path(), &["-x", "results"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Unknown option: -x"));
}

#[test]
fn test_help_succeeds() {
    let tmp = tempdir().unwrap();
    let out = run(tmp.path(), &["-h"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("Usage:"));
}

#[test]
fn test_load_test_run_writes_summary() {
    let tmp = tempdir().unwrap();
    let results = tmp.path().join("results");
    write(&results, "k6-summary-east-1.json", &k6_summary(100, 5.0, 0.0, 50.0, 90.0, 120.0));
    write(tmp.path(), "quiet.toml", "[output]\ncharts = false\n");

    let out = run(tmp.path(), &["-c", "quiet.toml", "-k", "results"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(results.join("analysis_summary.csv").exists());
    assert!(!results.join("system_metrics_summary.csv").exists());
    assert!(String::from_utf8_lossy(&out.stdout).contains("EAST"));
}
