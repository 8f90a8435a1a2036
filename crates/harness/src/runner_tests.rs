// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::call::Call;
use crate::failure::FailureKind;
use crate::stdio::{cprintln, flush, input};
use crate::suite::TestOptions;
use helpfultests_compare::{ComparisonPolicy, Whitespace};
use std::time::Duration;
use tempfile::TempDir;

fn fast_config() -> HarnessConfig {
    HarnessConfig {
        timeout_ms: 500,
        ..HarnessConfig::default()
    }
}

fn greet() {
    cprintln!("Hello   World");
}

fn basics() -> TestSuite {
    TestSuite::new("Basics")
        .test("passes", |case| {
            case.assert_output_equal("Hello World", &Call::new("greet"), greet)?;
            Ok(())
        })
        .test("fails", |case| case.assert_equal(&3, &4))
        .test("crashes", |case| {
            let values: Vec<u8> = Vec::new();
            Err(case.helpful_failure(values[1].to_string()))
        })
        .test("skips", |case| Err(case.skip("extra credit not attempted")))
}

fn statuses(report: &TestReport) -> Vec<(String, TestStatus)> {
    report
        .records
        .iter()
        .map(|r| (r.name.clone(), r.status))
        .collect()
}

#[test]
fn test_classifies_outcomes() {
    let report = Runner::new(fast_config()).run(vec![basics()]);
    assert_eq!(
        statuses(&report),
        vec![
            ("passes".to_string(), TestStatus::Passed),
            ("fails".to_string(), TestStatus::Failed),
            ("crashes".to_string(), TestStatus::Errored),
            ("skips".to_string(), TestStatus::Skipped),
        ]
    );
    let crashed = &report.records[2];
    assert_eq!(crashed.kind, Some(FailureKind::StudentPanic));
    assert!(!crashed.verdict.is_helpful);
    assert!(crashed.verdict.message.starts_with("Your code crashed: index out of bounds"));
    assert_eq!(
        report.records.iter().map(|r| r.seq).collect::<Vec<_>>(),
        [0, 1, 2, 3]
    );
}

#[test]
fn test_timeout_is_failed_with_hourglass() {
    let suite = TestSuite::new("Loops").test_with(
        "forever",
        TestOptions::default().timeout(Duration::from_millis(50)),
        |_| loop {
            flush();
        },
    );
    let report = Runner::new(fast_config()).run(vec![suite]);
    let record = &report.records[0];
    assert_eq!(record.status, TestStatus::Failed);
    assert_eq!(record.kind, Some(FailureKind::Timeout));
    assert!(record.verdict.message.starts_with("⌛ Took too long to run"));
    assert!(record.verdict.message.ends_with("timed out after 50ms."));
}

#[test]
fn test_next_test_after_timeout_sees_clean_stdio() {
    let suites = vec![
        TestSuite::new("Loops").test_with(
            "forever",
            TestOptions::default().timeout(Duration::from_millis(50)),
            |_| loop {
                cprintln!("spam");
            },
        ),
        TestSuite::new("After").test("greets", |case| {
            case.assert_output_equal("Hello World", &Call::new("greet"), greet)?;
            Ok(())
        }),
    ];
    let report = Runner::new(fast_config()).run(suites);
    assert_eq!(report.records[1].status, TestStatus::Passed);
}

#[test]
fn test_stray_input_fails_test() {
    let suite = TestSuite::new("Io").test("reads", |_| {
        input("name? ");
        Ok(())
    });
    let report = Runner::new(fast_config()).run(vec![suite]);
    let record = &report.records[0];
    assert_eq!(record.kind, Some(FailureKind::CaptureViolation));
    assert_eq!(
        record.verdict.message,
        "Your code tried to read input, but no input was given for this call."
    );
}

#[test]
fn test_deferred_suites_run_last() {
    let suites = vec![
        TestSuite::new("_Bonus").test("b", |_| Ok(())),
        TestSuite::new("Main").test("m", |_| Ok(())),
    ];
    let report = Runner::new(fast_config()).run(suites);
    let order: Vec<&str> = report.records.iter().map(|r| r.suite.as_str()).collect();
    assert_eq!(order, ["Main", "_Bonus"]);
}

#[test]
fn test_filter_selects_by_qualified_name() {
    let runner = Runner::new(fast_config()).with_filter(Some("Basics.fa".to_string()));
    let report = runner.run(vec![basics()]);
    assert_eq!(statuses(&report), vec![("fails".to_string(), TestStatus::Failed)]);

    let runner = Runner::new(fast_config()).with_filter(Some(String::new()));
    assert_eq!(runner.run(vec![basics()]).records.len(), 4);
}

#[test]
fn test_config_reaches_test_case() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.txt"), "payload").unwrap();
    let config = HarnessConfig {
        base_dir: dir.path().to_path_buf(),
        comparison: ComparisonPolicy::default().whitespace(Whitespace::Strict),
        ..fast_config()
    };
    let suite = TestSuite::new("Files")
        .test("reads", |case| case.assert_equal(&case.read_file("data.txt")?, "payload"))
        .test("strict", |case| {
            case.assert_output_equal("Hello World", &Call::new("greet"), greet)?;
            Ok(())
        });
    let report = Runner::new(config).run(vec![suite]);
    assert_eq!(report.records[0].status, TestStatus::Passed);
    assert_eq!(report.records[1].status, TestStatus::Failed);
}

#[test]
fn test_results_file_gets_every_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.jsonl");
    let config = HarnessConfig {
        results_file: Some(path.clone()),
        ..fast_config()
    };
    let report = Runner::new(config).run(vec![basics()]);
    let logged = ReportLog::read(&path).unwrap();
    assert_eq!(logged.len(), report.records.len());
    for (logged, record) in logged.iter().zip(&report.records) {
        assert_eq!(logged.seq, record.seq);
        assert_eq!(logged.name, record.name);
        assert_eq!(logged.verdict, record.verdict);
        assert_eq!(logged.recorded_at, record.recorded_at);
    }
}

#[test]
fn test_description_carried_into_record() {
    let suite = TestSuite::new("Docs").test_with(
        "described",
        TestOptions::default().description("Checks the docs"),
        |_| Ok(()),
    );
    let report = Runner::new(fast_config()).run(vec![suite]);
    assert_eq!(report.records[0].display_name(), "Docs.described\nChecks the docs");
}
