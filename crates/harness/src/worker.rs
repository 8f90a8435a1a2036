// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One test per process.
//!
//! The parent re-runs the instructor binary with [`WORKER_ENV`] naming a
//! single `Suite.test`. The child runs that test in-process and writes its
//! record to stdout as one prefixed JSON line. The parent kills the child
//! if it outlives the deadline, taking any runaway student code with it.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use thiserror::Error;

use helpfultests_capture::QuietPanicHook;

use crate::config::HarnessConfig;
use crate::report::TestRecord;
use crate::runner::Runner;
use crate::suite::TestSuite;

/// Names the test a worker process should run.
pub const WORKER_ENV: &str = "HELPFULTESTS_WORKER";

/// Resolved configuration handed to a worker, as JSON.
pub const WORKER_CONFIG_ENV: &str = "HELPFULTESTS_WORKER_CONFIG";

const RECORD_PREFIX: &str = "helpfultests-record ";

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("invalid worker configuration: {0}")]
    Config(#[source] serde_json::Error),

    #[error("no test named {0}")]
    UnknownTest(String),

    #[error("failed to encode test record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to report test record: {0}")]
    Write(#[from] io::Error),
}

/// How to start a worker process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerCommand {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// The running executable, with no arguments.
    pub fn current_exe() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub(crate) fn command(&self, target: &str, config: &HarnessConfig) -> Result<Command, WorkerError> {
        let config = serde_json::to_string(config).map_err(WorkerError::Config)?;
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .env(WORKER_ENV, target)
            .env(WORKER_CONFIG_ENV, config);
        Ok(command)
    }
}

/// The test this process was started to run, if it is a worker.
pub fn target() -> Option<String> {
    std::env::var(WORKER_ENV).ok().filter(|target| !target.is_empty())
}

/// Run the single test `target` and report its record on stdout.
pub fn serve(suites: Vec<TestSuite>, target: &str) -> ExitCode {
    match serve_to(&mut io::stdout().lock(), suites, target) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("helpfultests worker: {err}");
            ExitCode::FAILURE
        }
    }
}

pub(crate) fn serve_to(
    out: &mut impl Write,
    suites: Vec<TestSuite>,
    target: &str,
) -> Result<(), WorkerError> {
    let config = match std::env::var(WORKER_CONFIG_ENV) {
        Ok(json) => serde_json::from_str(&json).map_err(WorkerError::Config)?,
        Err(_) => HarnessConfig::default(),
    };
    let (suite, entry) = suites
        .iter()
        .find_map(|suite| {
            suite
                .tests()
                .iter()
                .find(|entry| qualified_name(suite.name(), entry.name()) == target)
                .map(|entry| (suite, entry))
        })
        .ok_or_else(|| WorkerError::UnknownTest(target.to_string()))?;

    let _hook = QuietPanicHook::install();
    let record = Runner::new(config).run_in_process(0, suite, entry);
    let json = serde_json::to_string(&record).map_err(WorkerError::Encode)?;
    writeln!(out, "{RECORD_PREFIX}{json}")?;
    out.flush()?;
    Ok(())
}

/// The last record line a worker wrote, ignoring anything else on stdout.
pub(crate) fn parse_record(stdout: &str) -> Option<TestRecord> {
    stdout
        .lines()
        .rev()
        .filter_map(|line| line.strip_prefix(RECORD_PREFIX))
        .find_map(|json| serde_json::from_str(json).ok())
}

pub(crate) fn qualified_name(suite: &str, test: &str) -> String {
    format!("{suite}.{test}")
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
