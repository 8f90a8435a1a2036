// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Running suites and collecting their records.

use chrono::Utc;
use std::time::{Duration, Instant};

use helpfultests_capture::{capture, ExecError, ProcessExecutor, QuietPanicHook, TimeoutExecutor};

use crate::case::{interrupted, TestCase};
use crate::config::HarnessConfig;
use crate::failure::{Failure, TestStatus, Verdict};
use crate::report::{ReportLog, TestRecord, TestReport};
use crate::suite::{order_suites, TestEntry, TestResult, TestSuite};
use crate::worker::{parse_record, qualified_name, WorkerCommand};

/// Time a worker process gets past the test deadline to start up and
/// report before it is killed.
const WORKER_GRACE: Duration = Duration::from_secs(2);

/// Where test bodies run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Isolation {
    /// On a worker thread of this process. A test that overruns its
    /// deadline is abandoned and stops at its next stdio call.
    #[default]
    InProcess,
    /// In a fresh worker process per test, killed if it overruns.
    Subprocess(WorkerCommand),
}

/// Runs suites one test at a time.
///
/// Each test gets its own deadline. Output it prints outside an assertion
/// is discarded and input it reads outside one fails the test.
#[derive(Clone, Debug, Default)]
pub struct Runner {
    config: HarnessConfig,
    filter: Option<String>,
    isolation: Isolation,
}

impl Runner {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            filter: None,
            isolation: Isolation::InProcess,
        }
    }

    pub fn with_isolation(mut self, isolation: Isolation) -> Self {
        self.isolation = isolation;
        self
    }

    pub fn isolation(&self) -> &Isolation {
        &self.isolation
    }

    /// Only run tests whose `Suite.test` name contains `filter`.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Run every selected test. Suites named with a leading `_` go last.
    pub fn run(&self, suites: Vec<TestSuite>) -> TestReport {
        let _hook = QuietPanicHook::install();
        let log = self.open_log();
        let mut report = TestReport::new(Utc::now());

        for suite in order_suites(suites) {
            for entry in suite.tests() {
                if !self.selects(suite.name(), entry.name()) {
                    continue;
                }
                let record = self.run_test(report.records.len() as u64, &suite, entry);
                if let Some(log) = &log {
                    if let Err(err) = log.append(&record) {
                        tracing::warn!(path = %log.path().display(), error = %err, "failed to log test record");
                    }
                }
                report.push(record);
            }
        }

        tracing::debug!(
            passed = report.count(TestStatus::Passed),
            failed = report.count(TestStatus::Failed),
            errored = report.count(TestStatus::Errored),
            skipped = report.count(TestStatus::Skipped),
            "run finished"
        );
        report
    }

    fn selects(&self, suite: &str, test: &str) -> bool {
        match &self.filter {
            Some(filter) => qualified_name(suite, test).contains(filter.as_str()),
            None => true,
        }
    }

    fn open_log(&self) -> Option<ReportLog> {
        let path = self.config.results_file.as_ref()?;
        match ReportLog::append_to(path) {
            Ok(log) => Some(log),
            Err(err) => {
                tracing::warn!(error = %err, "results file disabled");
                None
            }
        }
    }

    fn deadline(&self, entry: &TestEntry) -> Duration {
        entry.options().timeout.unwrap_or_else(|| self.config.timeout())
    }

    fn run_test(&self, seq: u64, suite: &TestSuite, entry: &TestEntry) -> TestRecord {
        tracing::debug!(suite = suite.name(), test = entry.name(), isolation = ?self.isolation, "running test");
        let record = match &self.isolation {
            Isolation::InProcess => self.run_in_process(seq, suite, entry),
            Isolation::Subprocess(worker) => self.run_in_worker(seq, suite, entry, worker),
        };
        tracing::debug!(
            suite = suite.name(),
            test = entry.name(),
            status = %record.status,
            elapsed_ms = record.elapsed.as_millis() as u64,
            "test finished"
        );
        record
    }

    pub(crate) fn run_in_process(&self, seq: u64, suite: &TestSuite, entry: &TestEntry) -> TestRecord {
        let case = TestCase::new(suite.name(), entry.name())
            .with_base_dir(self.config.base_dir.clone())
            .with_policy(self.config.comparison);
        let body = entry.body();

        let started = Instant::now();
        let result = TimeoutExecutor::new(self.deadline(entry))
            .run(move || capture(None, move || body(&case)).outcome);
        let elapsed = started.elapsed();

        let outcome: TestResult = match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(interrupt)) | Err(ExecError::Interrupted(interrupt)) => Err(interrupted("", interrupt)),
            Err(ExecError::Timeout(deadline)) => Err(Failure::timeout(deadline)),
            Err(err) => Err(Failure::harness(err.to_string())),
        };
        record(seq, suite, entry, outcome, elapsed)
    }

    fn run_in_worker(
        &self,
        seq: u64,
        suite: &TestSuite,
        entry: &TestEntry,
        worker: &WorkerCommand,
    ) -> TestRecord {
        let deadline = self.deadline(entry);
        let child_config = HarnessConfig {
            results_file: None,
            ..self.config.clone()
        };
        let started = Instant::now();
        let result = worker
            .command(&qualified_name(suite.name(), entry.name()), &child_config)
            .map_err(|err| Failure::harness(err.to_string()))
            .and_then(|command| {
                ProcessExecutor::new(deadline + WORKER_GRACE)
                    .run(command)
                    .map_err(|err| match err {
                        ExecError::Timeout(_) => Failure::timeout(deadline),
                        other => Failure::harness(other.to_string()),
                    })
            });
        let elapsed = started.elapsed();

        let output = match result {
            Ok(output) => output,
            Err(failure) => return record(seq, suite, entry, Err(failure), elapsed),
        };
        match parse_record(&output.stdout) {
            Some(reported) => TestRecord { seq, ..reported },
            None => {
                let mut message = format!(
                    "Your code crashed: the test process exited ({}) without reporting a result.",
                    output.status
                );
                if let Some(last) = output.stderr.lines().rev().find(|line| !line.trim().is_empty()) {
                    message.push_str(&format!("\n    {}", last.trim()));
                }
                tracing::warn!(status = %output.status, "worker process reported no record");
                record(seq, suite, entry, Err(Failure::student_panic(message)), elapsed)
            }
        }
    }
}

fn record(
    seq: u64,
    suite: &TestSuite,
    entry: &TestEntry,
    outcome: TestResult,
    elapsed: Duration,
) -> TestRecord {
    let (status, kind, verdict) = match &outcome {
        Ok(()) => (TestStatus::Passed, None, Verdict::pass()),
        Err(failure) => (failure.status(), Some(failure.kind), failure.verdict()),
    };
    TestRecord {
        seq,
        suite: suite.name().to_string(),
        name: entry.name().to_string(),
        description: entry.options().description.clone(),
        status,
        kind,
        verdict,
        recorded_at: Utc::now(),
        elapsed,
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
