// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Helpful Tests
//!
//! An instructional test harness. Instructors write test suites against
//! student functions; failures come back as messages a novice can act on,
//! with diffs of printed output, the input the "user" typed, and the line
//! of the test that failed.
//!
#![doc = include_str!("../docs/USAGE.md")]

/// Console functions student code uses instead of `print!` and stdin.
///
/// Tests can only see and script what goes through these.
pub mod stdio {
    pub use helpfultests_capture::{
        cprint, cprintln, flush, input, print_fmt, read_line, write_stdout,
    };
}

/// Output comparison building blocks.
pub mod compare {
    pub use helpfultests_compare::{
        markup, CompareError, Comparison, ComparisonPolicy, OutputComparator, Whitespace,
    };
}

pub mod call;
pub mod case;
#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod failure;
pub mod report;
pub mod runner;
pub mod suite;
pub mod value;
pub mod worker;

pub use call::Call;
pub use case::{
    DocError, DocKind, DocTarget, TestCase, DEFAULT_DOC_MIN_LENGTH, DEFAULT_NO_INPUT_MESSAGE,
    DEFAULT_NO_PRINT_MESSAGE,
};
pub use cli::{run_main, run_with_args, RunArgs};
pub use config::{ConfigError, HarnessConfig};
pub use failure::{Failure, FailureKind, TestStatus, Verdict, TIMEOUT_MESSAGE};
pub use helpfultests_capture::DEFAULT_TIMEOUT;
pub use helpfultests_compare::{ComparisonPolicy, Whitespace};
pub use report::{ReportError, ReportLog, TestRecord, TestReport};
pub use runner::{Isolation, Runner};
pub use suite::{SuitePriority, TestOptions, TestResult, TestSuite};
pub use worker::{WorkerCommand, WorkerError};
