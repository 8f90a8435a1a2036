// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Helpful Tests binary entry point.
//!
//! Test suites are compiled into instructor binaries that call
//! `helpfultests::run_main`. This binary works with what those runs leave
//! behind: saved result logs and configuration files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use helpfultests::cli::init_logging;
use helpfultests::{HarnessConfig, ReportLog, TestReport};

#[derive(Parser, Debug)]
#[command(name = "helpfultests", version, about = "Helpful Tests report tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the report for a saved JSONL results file
    Render {
        /// Results file written with `results_file` / `--results-file`
        path: PathBuf,

        /// Print the report as HTML
        #[arg(long, alias = "email")]
        html: bool,
    },
    /// Check that a configuration file is valid
    CheckConfig {
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render { path, html } => ReportLog::read(&path)
            .map(|records| TestReport::from_records(records).render(html))
            .map_err(|err| err.to_string()),
        Command::CheckConfig { path } => HarnessConfig::load(&path)
            .map(|config| {
                format!(
                    "{}: ok (timeout {}ms, {} whitespace)",
                    path.display(),
                    config.timeout_ms,
                    config.comparison.whitespace
                )
            })
            .map_err(|err| format!("{}: {err}", path.display())),
    };

    match result {
        Ok(text) => {
            println!("{}", text.trim_end_matches('\n'));
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("helpfultests: {message}");
            ExitCode::FAILURE
        }
    }
}
