// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test records and the end-of-run report.

mod duration_serde;
mod html;
mod log;

pub use html::to_html;
pub use log::{ReportError, ReportLog};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Duration;

use crate::failure::{FailureKind, TestStatus, Verdict};

const SECTION_RULE_WIDTH: usize = 75;

/// The outcome of one test.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Position in the run, starting at 0.
    pub seq: u64,
    pub suite: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    pub verdict: Verdict,
    pub recorded_at: DateTime<Utc>,
    #[serde(with = "duration_serde")]
    pub elapsed: Duration,
}

impl TestRecord {
    /// `Suite.test`, followed by the description on its own line.
    pub fn display_name(&self) -> String {
        let name = format!("{}.{}", self.suite, self.name);
        match &self.description {
            Some(desc) if !desc.is_empty() => format!("{name}\n{desc}"),
            _ => name,
        }
    }
}

/// Every record from one run, in the order the tests ran.
#[derive(Clone, Debug, PartialEq)]
pub struct TestReport {
    pub started_at: DateTime<Utc>,
    pub records: Vec<TestRecord>,
}

impl TestReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            records: Vec::new(),
        }
    }

    /// Rebuild a report from saved records. The start time is taken from
    /// the earliest record, or now when there are none.
    pub fn from_records(records: Vec<TestRecord>) -> Self {
        let started_at = records
            .iter()
            .map(|record| record.recorded_at - chrono_duration(record.elapsed))
            .min()
            .unwrap_or_else(Utc::now);
        Self {
            started_at,
            records,
        }
    }

    pub fn push(&mut self, record: TestRecord) {
        self.records.push(record);
    }

    pub fn with_status(&self, status: TestStatus) -> impl Iterator<Item = &TestRecord> {
        self.records.iter().filter(move |record| record.status == status)
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.with_status(status).count()
    }

    /// No test failed or errored. Skipped tests do not count against a run.
    pub fn was_successful(&self) -> bool {
        self.count(TestStatus::Failed) == 0 && self.count(TestStatus::Errored) == 0
    }

    /// The plain-text report shown to the student.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.was_successful() {
            out.push_str("🙂 All tests passed successfully!\n");
        } else {
            out.push_str("🙁 Your code did not pass all of the tests.\n");
        }
        out.push('\n');

        let listings = [
            ("Succeeded", "", TestStatus::Passed),
            (
                "Skipped",
                " (incomplete extra credit or alternate options)",
                TestStatus::Skipped,
            ),
        ];
        for (label, note, status) in listings {
            let records: Vec<_> = self.with_status(status).collect();
            if records.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{label}: {}{note}", records.len());
            for record in records {
                let _ = writeln!(out, "  {}", record.display_name());
            }
            out.push('\n');
        }

        let sections = [
            (
                "Failed",
                " (your code didn't return/output the expected value)",
                TestStatus::Failed,
            ),
            (
                "Errored",
                " (your code crashed during the test)",
                TestStatus::Errored,
            ),
        ];
        for (label, note, status) in sections {
            let records: Vec<_> = self.with_status(status).collect();
            if records.is_empty() {
                continue;
            }
            out.push_str(&"=".repeat(SECTION_RULE_WIDTH));
            out.push_str("\n\n");
            let _ = writeln!(out, "{label}: {}{note}", records.len());
            out.push('\n');
            for record in records {
                let _ = writeln!(out, "  {}:", record.display_name());
                let message = record.verdict.message.lines().collect::<Vec<_>>().join("\n    ");
                let _ = writeln!(out, "    {message}");
            }
        }
        out
    }

    /// The text report converted to an HTML fragment.
    pub fn render_html(&self) -> String {
        to_html(&self.render_text())
    }

    pub fn render(&self, html: bool) -> String {
        if html {
            self.render_html()
        } else {
            self.render_text()
        }
    }
}

fn chrono_duration(elapsed: Duration) -> chrono::Duration {
    chrono::Duration::from_std(elapsed).unwrap_or_else(|_| chrono::Duration::zero())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
