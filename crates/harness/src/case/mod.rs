// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The test case handed to every test body.
//!
//! [`TestCase`] carries the assertion methods. They are split by concern:
//! stdio-aware assertions in `io_asserts`, plain value assertions in
//! `value_asserts`, and documentation checks in `doc`.

mod doc;
mod io_asserts;
mod value_asserts;

pub use doc::{DocError, DocKind, DocTarget, DEFAULT_DOC_MIN_LENGTH};
pub use io_asserts::{DEFAULT_NO_INPUT_MESSAGE, DEFAULT_NO_PRINT_MESSAGE};

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use helpfultests_capture::{ExecError, Interrupt, TimeoutExecutor, ViolationKind};
use helpfultests_compare::ComparisonPolicy;

use crate::call::Call;
use crate::failure::{Failure, FailureKind};

/// One running test: its identity plus the settings assertions use.
#[derive(Clone, Debug)]
pub struct TestCase {
    suite: String,
    name: String,
    base_dir: PathBuf,
    policy: ComparisonPolicy,
}

impl TestCase {
    pub fn new(suite: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            name: name.into(),
            base_dir: PathBuf::from("."),
            policy: ComparisonPolicy::default(),
        }
    }

    /// Directory that [`read_file`](Self::read_file) resolves against.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Policy used by output assertions that do not take one explicitly.
    pub fn with_policy(mut self, policy: ComparisonPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn policy(&self) -> ComparisonPolicy {
        self.policy
    }

    /// Read a whole text file relative to the base directory.
    pub fn read_file(&self, filename: impl AsRef<Path>) -> Result<String, Failure> {
        let filename = filename.as_ref();
        let path = self.base_dir.join(filename);
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Failure::new(
                FailureKind::FileNotFound,
                format!("Could not find the file {}", filename.display()),
            ),
            _ => Failure::harness(format!(
                "Could not read the file {}: {err}",
                filename.display()
            )),
        })
    }

    /// A failure whose message is shown to the student word for word.
    ///
    /// Return it from the test (`return Err(case.helpful_failure(..))`).
    pub fn helpful_failure(&self, message: impl Into<String>) -> Failure {
        Failure::helpful(message)
    }

    /// Mark the test as skipped, e.g. for extra credit not attempted.
    pub fn skip(&self, reason: impl Into<String>) -> Failure {
        Failure::skipped(reason)
    }

    /// Run `func` under its own deadline, on top of the test's deadline.
    pub fn run_with_timeout<R, F>(&self, deadline: Duration, call: &Call, func: F) -> Result<R, Failure>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let header = call_header(call);
        TimeoutExecutor::new(deadline)
            .run(func)
            .map_err(|err| match err {
                ExecError::Timeout(deadline) => {
                    let timeout = Failure::timeout(deadline);
                    Failure::new(timeout.kind, format!("{header}{}", timeout.message))
                }
                ExecError::Interrupted(interrupt) => interrupted(&header, interrupt),
                other => Failure::harness(format!("{header}{other}")),
            })
    }
}

pub(crate) fn call_header(call: &Call) -> String {
    format!("The function call was: {call}\n")
}

/// Turn a captured interruption into a failure, prefixed with `header`.
pub(crate) fn interrupted(header: &str, interrupt: Interrupt) -> Failure {
    match interrupt {
        Interrupt::Violation(violation) if violation.kind == ViolationKind::InputRead => {
            Failure::new(
                FailureKind::CaptureViolation,
                format!(
                    "{header}Your code tried to read input, but no input was given for this call."
                ),
            )
        }
        Interrupt::Violation(_) => Failure::new(
            FailureKind::CaptureViolation,
            format!("{header}Your code printed output where it was not allowed to."),
        ),
        Interrupt::InputExhausted => Failure::new(
            FailureKind::IncompleteInput,
            format!("{header}You read all information given and then kept trying to get more input."),
        ),
        Interrupt::Panic { message, location } => {
            let mut text = format!("{header}Your code crashed: {message}");
            if let Some(location) = location {
                text.push_str(&format!("\n    at {location}"));
            }
            Failure::student_panic(text)
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
