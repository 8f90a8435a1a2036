// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test suites as instructors write them.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::case::TestCase;
use crate::failure::Failure;

/// What a test body returns. `Err` carries the failure to report.
pub type TestResult = Result<(), Failure>;

pub(crate) type TestBody = Arc<dyn Fn(&TestCase) -> TestResult + Send + Sync>;

/// Per-test settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestOptions {
    /// Shown under the test name in the report.
    pub description: Option<String>,
    /// Overrides the run's deadline for this test.
    pub timeout: Option<Duration>,
}

impl TestOptions {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Clone)]
pub struct TestEntry {
    name: String,
    options: TestOptions,
    body: TestBody,
}

impl TestEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &TestOptions {
        &self.options
    }

    pub(crate) fn body(&self) -> TestBody {
        Arc::clone(&self.body)
    }
}

impl fmt::Debug for TestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestEntry")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Suites whose names start with `_` run after all others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SuitePriority {
    Normal,
    Deferred,
}

/// A named, ordered group of tests.
#[derive(Clone, Debug)]
pub struct TestSuite {
    name: String,
    tests: Vec<TestEntry>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tests: Vec::new(),
        }
    }

    /// Add a test. Tests run in the order they were added.
    pub fn test<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&TestCase) -> TestResult + Send + Sync + 'static,
    {
        self.test_with(name, TestOptions::default(), body)
    }

    pub fn test_with<F>(mut self, name: impl Into<String>, options: TestOptions, body: F) -> Self
    where
        F: Fn(&TestCase) -> TestResult + Send + Sync + 'static,
    {
        self.tests.push(TestEntry {
            name: name.into(),
            options,
            body: Arc::new(body),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tests(&self) -> &[TestEntry] {
        &self.tests
    }

    pub fn priority(&self) -> SuitePriority {
        if self.name.starts_with('_') {
            SuitePriority::Deferred
        } else {
            SuitePriority::Normal
        }
    }
}

/// Order suites by priority, keeping declaration order within a priority.
pub fn order_suites(mut suites: Vec<TestSuite>) -> Vec<TestSuite> {
    suites.sort_by_key(TestSuite::priority);
    suites
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
