// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test failures and verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use helpfultests_capture::format_deadline;

/// Message shown when a test runs past its deadline.
pub const TIMEOUT_MESSAGE: &str =
    "⌛ Took too long to run, perhaps you have an infinite loop or an extra input() call?";

/// Why a test did not pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Expected and actual values or output differ.
    Assertion,
    /// A message written by the test author, shown verbatim.
    Helpful,
    /// The deadline passed.
    Timeout,
    /// Output or input where the test forbids it.
    CaptureViolation,
    /// Input was read past its end, not at all, or not completely.
    IncompleteInput,
    MissingDocumentation,
    FileNotFound,
    /// The student code crashed.
    StudentPanic,
    /// The harness could not carry out the check, e.g. an invalid
    /// expected pattern.
    Harness,
    Skipped,
}

impl FailureKind {
    pub fn status(self) -> TestStatus {
        match self {
            FailureKind::StudentPanic | FailureKind::Harness => TestStatus::Errored,
            FailureKind::Skipped => TestStatus::Skipped,
            _ => TestStatus::Failed,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Assertion => "assertion",
            FailureKind::Helpful => "helpful",
            FailureKind::Timeout => "timeout",
            FailureKind::CaptureViolation => "capture violation",
            FailureKind::IncompleteInput => "incomplete input",
            FailureKind::MissingDocumentation => "missing documentation",
            FailureKind::FileNotFound => "file not found",
            FailureKind::StudentPanic => "student panic",
            FailureKind::Harness => "harness",
            FailureKind::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// How a test ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Errored,
    Skipped,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Errored => "errored",
            TestStatus::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// The error every assertion returns.
///
/// `helpful` messages were written for the student and are shown as-is.
/// The others describe a crash or a harness problem.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    pub helpful: bool,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let helpful = !matches!(kind, FailureKind::StudentPanic | FailureKind::Harness);
        Self {
            kind,
            message: message.into(),
            helpful,
        }
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Assertion, message)
    }

    pub fn helpful(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Helpful, message)
    }

    pub fn timeout(deadline: Duration) -> Self {
        Self::new(
            FailureKind::Timeout,
            format!(
                "{TIMEOUT_MESSAGE}\nThe test timed out after {}.",
                format_deadline(&deadline)
            ),
        )
    }

    pub fn student_panic(message: impl Into<String>) -> Self {
        Self::new(FailureKind::StudentPanic, message)
    }

    pub fn harness(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Harness, message)
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::new(FailureKind::Skipped, reason)
    }

    pub fn status(&self) -> TestStatus {
        self.kind.status()
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            passed: false,
            message: self.message.clone(),
            is_helpful: self.helpful,
        }
    }
}

/// What the report layer gets for every test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
    pub is_helpful: bool,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
            is_helpful: false,
        }
    }
}

impl From<&Failure> for Verdict {
    fn from(failure: &Failure) -> Self {
        failure.verdict()
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
