// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command line for instructor test binaries.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, HarnessConfig};
use crate::runner::{Isolation, Runner};
use crate::suite::TestSuite;
use crate::worker::{self, WorkerCommand};

/// Run the tests and print a report written for students.
#[derive(Parser, Clone, Debug, Default, PartialEq, Eq)]
#[command(name = "helpfultests", version, about = "Run student tests with helpful failure messages")]
pub struct RunArgs {
    /// Configuration file (TOML)
    #[arg(long, env = "HELPFULTESTS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as HTML
    #[arg(long, alias = "email")]
    pub html: bool,

    /// Deadline for each test, in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Directory that test files are read from
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Append every test record to this JSONL file
    #[arg(long, value_name = "FILE")]
    pub results_file: Option<PathBuf>,

    /// Only run tests whose `Suite.test` name contains this text
    #[arg(long, value_name = "TEXT")]
    pub filter: Option<String>,

    /// Run tests on threads of this process instead of one process each
    #[arg(long)]
    pub in_process: bool,
}

impl RunArgs {
    /// One worker process per test, unless `--in-process` was given or the
    /// running executable cannot be located.
    pub fn isolation(&self) -> Isolation {
        if self.in_process {
            return Isolation::InProcess;
        }
        match WorkerCommand::current_exe() {
            Ok(worker) => Isolation::Subprocess(worker),
            Err(err) => {
                tracing::warn!(error = %err, "cannot locate own executable; running tests in-process");
                Isolation::InProcess
            }
        }
    }
}

/// The configuration file (or defaults) with command-line overrides applied.
pub fn resolve_config(args: &RunArgs) -> Result<HarnessConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    if args.html {
        config.use_html = true;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(base_dir) = &args.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(results_file) = &args.results_file {
        config.results_file = Some(results_file.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run `suites` and render the report.
pub fn run_with_args(
    args: &RunArgs,
    suites: Vec<TestSuite>,
    isolation: Isolation,
) -> Result<String, ConfigError> {
    let config = resolve_config(args)?;
    let html = config.use_html;
    let report = Runner::new(config)
        .with_filter(args.filter.clone())
        .with_isolation(isolation)
        .run(suites);
    Ok(report.render(html))
}

/// Entry point for instructor test binaries.
///
/// Always exits successfully: the report is the result, even when tests
/// fail or the configuration is unusable. When started as a worker it runs
/// just the one test it was handed.
pub fn run_main(suites: Vec<TestSuite>) -> ExitCode {
    init_logging();
    if let Some(target) = worker::target() {
        return worker::serve(suites, &target);
    }
    let args = RunArgs::parse();
    let isolation = args.isolation();
    match run_with_args(&args, suites, isolation) {
        Ok(mut text) => {
            if !text.ends_with('\n') {
                text.push('\n');
            }
            print!("{text}");
        }
        Err(err) => eprintln!("helpfultests: {err}"),
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
