// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn parse(args: &[&str]) -> RunArgs {
    RunArgs::try_parse_from(std::iter::once("helpfultests").chain(args.iter().copied())).unwrap()
}

fn suite() -> TestSuite {
    TestSuite::new("Basics")
        .test("passes", |_| Ok(()))
        .test("fails", |case| case.assert_true(false))
}

#[test]
fn test_parse_flags() {
    let args = parse(&[
        "--html",
        "--timeout-ms",
        "250",
        "--base-dir",
        "student",
        "--results-file",
        "out.jsonl",
        "--filter",
        "Basics",
    ]);
    assert!(args.html);
    assert_eq!(args.timeout_ms, Some(250));
    assert_eq!(args.base_dir, Some(PathBuf::from("student")));
    assert_eq!(args.results_file, Some(PathBuf::from("out.jsonl")));
    assert_eq!(args.filter.as_deref(), Some("Basics"));
}

#[test]
fn test_isolation_flag() {
    assert_eq!(parse(&["--in-process"]).isolation(), Isolation::InProcess);
    match parse(&[]).isolation() {
        Isolation::Subprocess(worker) => {
            assert_eq!(worker.program(), std::env::current_exe().unwrap().as_path());
        }
        other => panic!("expected a worker per test, got {other:?}"),
    }
}

#[test]
fn test_email_alias() {
    assert!(parse(&["--email"]).html);
}

#[test]
fn test_resolve_defaults() {
    let config = resolve_config(&RunArgs::default()).unwrap();
    assert_eq!(config, HarnessConfig::default());
}

#[test]
fn test_flags_override_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("helpfultests.toml");
    fs::write(&path, "timeout_ms = 2000\nbase_dir = \"from-file\"\n").unwrap();
    let args = RunArgs {
        config: Some(path),
        timeout_ms: Some(300),
        ..RunArgs::default()
    };
    let config = resolve_config(&args).unwrap();
    assert_eq!(config.timeout(), Duration::from_millis(300));
    assert_eq!(config.base_dir, PathBuf::from("from-file"));
}

#[test]
fn test_zero_timeout_flag_rejected() {
    let args = RunArgs {
        timeout_ms: Some(0),
        ..RunArgs::default()
    };
    assert!(matches!(
        resolve_config(&args),
        Err(ConfigError::InvalidTimeout)
    ));
}

#[test]
fn test_run_with_args_text() {
    let text = run_with_args(&RunArgs::default(), vec![suite()], Isolation::InProcess).unwrap();
    assert!(text.starts_with("🙁 Your code did not pass all of the tests.\n"));
    assert!(text.contains("Succeeded: 1\n  Basics.passes\n"));
    assert!(text.contains("  Basics.fails:\n"));
}

#[test]
fn test_run_with_args_html_and_filter() {
    let args = RunArgs {
        html: true,
        filter: Some("passes".to_string()),
        ..RunArgs::default()
    };
    let html = run_with_args(&args, vec![suite()], Isolation::InProcess).unwrap();
    assert!(html.starts_with("<pre>🙂 All tests passed successfully!"));
}

#[test]
fn test_run_with_args_bad_config() {
    let dir = TempDir::new().unwrap();
    let args = RunArgs {
        config: Some(dir.path().join("missing.toml")),
        ..RunArgs::default()
    };
    assert!(matches!(
        run_with_args(&args, vec![suite()], Isolation::InProcess),
        Err(ConfigError::Io { .. })
    ));
}
