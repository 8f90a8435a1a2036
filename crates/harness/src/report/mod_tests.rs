// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::failure::Failure;
use chrono::TimeZone;

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, minute, 0).unwrap()
}

fn record(name: &str, failure: Option<Failure>) -> TestRecord {
    let (status, kind, verdict) = match &failure {
        Some(failure) => (failure.status(), Some(failure.kind), failure.verdict()),
        None => (TestStatus::Passed, None, Verdict::pass()),
    };
    TestRecord {
        seq: 0,
        suite: "Basics".to_string(),
        name: name.to_string(),
        description: None,
        status,
        kind,
        verdict,
        recorded_at: at(0),
        elapsed: Duration::ZERO,
    }
}

fn report(records: Vec<TestRecord>) -> TestReport {
    let mut report = TestReport::new(at(0));
    for record in records {
        report.push(record);
    }
    report
}

#[test]
fn test_display_name_with_description() {
    let mut rec = record("test_greet", None);
    assert_eq!(rec.display_name(), "Basics.test_greet");
    rec.description = Some("Greets the user".to_string());
    assert_eq!(rec.display_name(), "Basics.test_greet\nGreets the user");
}

#[test]
fn test_all_passed() {
    let report = report(vec![record("a", None), record("b", None)]);
    assert!(report.was_successful());
    assert_eq!(
        report.render_text(),
        "🙂 All tests passed successfully!\n\nSucceeded: 2\n  Basics.a\n  Basics.b\n\n"
    );
}

#[test]
fn test_skips_do_not_fail_the_run() {
    let report = report(vec![record("bonus", Some(Failure::skipped("not attempted")))]);
    assert!(report.was_successful());
    assert_eq!(
        report.render_text(),
        "🙂 All tests passed successfully!\n\n\
         Skipped: 1 (incomplete extra credit or alternate options)\n  Basics.bonus\n\n"
    );
}

#[test]
fn test_failures_and_errors_layout() {
    let report = report(vec![
        record("ok", None),
        record("wrong", Some(Failure::assertion("Expected return value: 4\nActual return value:   3"))),
        record("crash", Some(Failure::student_panic("Your code crashed: boom"))),
    ]);
    let rule = "=".repeat(75);
    let expected = format!(
        "🙁 Your code did not pass all of the tests.\n\n\
         Succeeded: 1\n  Basics.ok\n\n\
         {rule}\n\n\
         Failed: 1 (your code didn't return/output the expected value)\n\n\
         \x20 Basics.wrong:\n\
         \x20   Expected return value: 4\n\
         \x20   Actual return value:   3\n\
         {rule}\n\n\
         Errored: 1 (your code crashed during the test)\n\n\
         \x20 Basics.crash:\n\
         \x20   Your code crashed: boom\n"
    );
    assert!(!report.was_successful());
    assert_eq!(report.render_text(), expected);
}

#[test]
fn test_counts() {
    let report = report(vec![
        record("a", None),
        record("b", Some(Failure::timeout(Duration::from_secs(1)))),
        record("c", Some(Failure::harness("bad pattern"))),
    ]);
    assert_eq!(report.count(TestStatus::Passed), 1);
    assert_eq!(report.count(TestStatus::Failed), 1);
    assert_eq!(report.count(TestStatus::Errored), 1);
    assert_eq!(report.count(TestStatus::Skipped), 0);
}

#[test]
fn test_render_html_wraps_text() {
    let report = report(vec![record("a", None)]);
    let html = report.render(true);
    assert!(html.starts_with("<pre>🙂 All tests passed successfully!<br><br>"));
    assert!(html.ends_with("</pre>"));
    assert_eq!(report.render(false), report.render_text());
}

#[test]
fn test_from_records_uses_earliest_start() {
    let mut late = record("late", None);
    late.recorded_at = at(30);
    let mut early = record("early", None);
    early.recorded_at = at(10);
    early.elapsed = Duration::from_secs(60);
    let report = TestReport::from_records(vec![late, early]);
    assert_eq!(report.started_at, at(9));
    assert_eq!(report.records.len(), 2);
}
