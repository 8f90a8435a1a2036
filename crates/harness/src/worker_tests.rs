// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::failure::{FailureKind, TestStatus};
use std::ffi::OsStr;
use yare::parameterized;

fn suites() -> Vec<TestSuite> {
    vec![TestSuite::new("Math")
        .test("adds", |case| case.assert_equal(&(2 + 2), &4))
        .test("wrong", |case| case.assert_equal(&(2 + 2), &5))]
}

fn served(target: &str) -> Result<TestRecord, WorkerError> {
    let mut out = Vec::new();
    serve_to(&mut out, suites(), target)?;
    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.starts_with(RECORD_PREFIX), "{stdout}");
    Ok(parse_record(&stdout).unwrap())
}

#[test]
fn test_serves_passing_test() {
    let record = served("Math.adds").unwrap();
    assert_eq!(record.suite, "Math");
    assert_eq!(record.name, "adds");
    assert_eq!(record.status, TestStatus::Passed);
}

#[test]
fn test_serves_failing_test() {
    let record = served("Math.wrong").unwrap();
    assert_eq!(record.kind, Some(FailureKind::Assertion));
}

#[parameterized(
    unknown_test = { "Math.divides" },
    unknown_suite = { "Physics.adds" },
    partial_name = { "Math.add" },
)]
fn test_unknown_target(target: &str) {
    let err = serve_to(&mut Vec::new(), suites(), target).unwrap_err();
    assert!(matches!(err, WorkerError::UnknownTest(name) if name == target));
}

#[test]
fn test_parse_record_skips_surrounding_noise() {
    let record = served("Math.adds").unwrap();
    let json = serde_json::to_string(&record).unwrap();
    let stdout = format!("running 1 test\n{RECORD_PREFIX}{{broken\n{RECORD_PREFIX}{json}\ntest ok\n");
    assert_eq!(parse_record(&stdout).unwrap().name, "adds");
}

#[test]
fn test_parse_record_without_record() {
    assert!(parse_record("running 1 test\nthread panicked\n").is_none());
    assert!(parse_record("").is_none());
}

#[test]
fn test_command_carries_target_and_config() {
    let config = HarnessConfig {
        timeout_ms: 250,
        ..HarnessConfig::default()
    };
    let worker = WorkerCommand::new("/bin/instructor-tests")
        .arg("--exact")
        .env("EXTRA", "1");
    let command = worker.command("Math.adds", &config).unwrap();

    assert_eq!(command.get_program(), OsStr::new("/bin/instructor-tests"));
    assert_eq!(command.get_args().collect::<Vec<_>>(), [OsStr::new("--exact")]);
    let env = |key: &str| {
        command
            .get_envs()
            .find(|(k, _)| *k == OsStr::new(key))
            .and_then(|(_, v)| v)
            .map(|v| v.to_string_lossy().into_owned())
    };
    assert_eq!(env(WORKER_ENV).as_deref(), Some("Math.adds"));
    assert_eq!(env("EXTRA").as_deref(), Some("1"));
    let handed: HarnessConfig = serde_json::from_str(&env(WORKER_CONFIG_ENV).unwrap()).unwrap();
    assert_eq!(handed, config);
}

#[test]
fn test_qualified_name() {
    assert_eq!(qualified_name("Math", "adds"), "Math.adds");
}
