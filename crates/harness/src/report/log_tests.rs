// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::failure::{Failure, TestStatus, Verdict};
use chrono::{TimeZone, Utc};
use std::time::Duration;
use tempfile::TempDir;

fn record(seq: u64, failure: Option<Failure>) -> TestRecord {
    let (status, kind, verdict) = match &failure {
        Some(failure) => (failure.status(), Some(failure.kind), failure.verdict()),
        None => (TestStatus::Passed, None, Verdict::pass()),
    };
    TestRecord {
        seq,
        suite: "Basics".to_string(),
        name: format!("test_{seq}"),
        description: None,
        status,
        kind,
        verdict,
        recorded_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        elapsed: Duration::from_millis(15),
    }
}

#[test]
fn test_append_then_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.jsonl");
    let log = ReportLog::append_to(&path).unwrap();
    let first = record(0, None);
    let second = record(1, Some(Failure::assertion("Expected return value: 4")));
    log.append(&first).unwrap();
    log.clone().append(&second).unwrap();

    let records = ReportLog::read(&path).unwrap();
    assert_eq!(records, vec![first, second]);
}

#[test]
fn test_append_keeps_existing_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.jsonl");
    ReportLog::append_to(&path).unwrap().append(&record(0, None)).unwrap();
    ReportLog::append_to(&path).unwrap().append(&record(1, None)).unwrap();
    assert_eq!(ReportLog::read(&path).unwrap().len(), 2);
}

#[test]
fn test_record_json_shape() {
    let json = serde_json::to_value(record(3, Some(Failure::skipped("extra credit")))).unwrap();
    assert_eq!(json["status"], "skipped");
    assert_eq!(json["kind"], "skipped");
    assert_eq!(json["elapsed"], 15_000);
    assert!(json.get("description").is_none());
}

#[test]
fn test_read_skips_blank_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.jsonl");
    let line = serde_json::to_string(&record(0, None)).unwrap();
    std::fs::write(&path, format!("\n{line}\n\n")).unwrap();
    assert_eq!(ReportLog::read(&path).unwrap().len(), 1);
}

#[test]
fn test_read_reports_bad_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.jsonl");
    let line = serde_json::to_string(&record(0, None)).unwrap();
    std::fs::write(&path, format!("{line}\nnot json\n")).unwrap();
    let err = ReportLog::read(&path).unwrap_err();
    assert!(matches!(err, ReportError::Decode { line: 2, .. }));
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = ReportLog::read(dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, ReportError::Open { .. }));
    assert!(err.to_string().starts_with("could not open "));
}
