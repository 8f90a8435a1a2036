// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assertions about what student code prints and reads.

use std::fmt;
use std::ops::Range;

use helpfultests_capture::{capture, forbid_input, forbid_output, Interrupt};
use helpfultests_compare::{indent_lines, ComparisonPolicy, OutputComparator};

use super::{call_header, interrupted, TestCase};
use crate::call::Call;
use crate::failure::{Failure, FailureKind};
use crate::value::describe;

pub const DEFAULT_NO_PRINT_MESSAGE: &str = "You are not allowed to print, instead use return values";
pub const DEFAULT_NO_INPUT_MESSAGE: &str = "You are not allowed to read input, instead use parameters";

/// A call that read all of its scripted input.
struct InputRun<R> {
    header: String,
    value: R,
    stdout: String,
    input_ranges: Vec<Range<usize>>,
}

impl TestCase {
    /// Check what `func` prints, using the case's comparison policy.
    ///
    /// Any attempt to read input fails the test. Returns `func`'s value.
    pub fn assert_output_equal<R>(
        &self,
        expected: &str,
        call: &Call,
        func: impl FnOnce() -> R,
    ) -> Result<R, Failure> {
        self.assert_output_equal_with(self.policy(), expected, call, func)
    }

    pub fn assert_output_equal_with<R>(
        &self,
        policy: ComparisonPolicy,
        expected: &str,
        call: &Call,
        func: impl FnOnce() -> R,
    ) -> Result<R, Failure> {
        let header = call_header(call);
        let captured = capture(None, func);
        let value = captured
            .outcome
            .map_err(|interrupt| interrupted(&header, interrupt))?;
        check_output(&header, policy, expected, &captured.stdout, &[])?;
        Ok(value)
    }

    /// Feed `input` to `func`, then check its return value.
    ///
    /// Every string argument of `call` must also appear in the output.
    pub fn assert_equal_using_user_input<R, E>(
        &self,
        input: &str,
        expected: &E,
        call: &Call,
        func: impl FnOnce() -> R,
    ) -> Result<R, Failure>
    where
        R: PartialEq<E> + fmt::Debug,
        E: fmt::Debug + ?Sized,
    {
        self.assert_equal_using_user_input_with(input, expected, true, call, func)
    }

    pub fn assert_equal_using_user_input_with<R, E>(
        &self,
        input: &str,
        expected: &E,
        must_output_args: bool,
        call: &Call,
        func: impl FnOnce() -> R,
    ) -> Result<R, Failure>
    where
        R: PartialEq<E> + fmt::Debug,
        E: fmt::Debug + ?Sized,
    {
        let run = run_with_input(input, call, func)?;
        if run.value != *expected {
            return Err(Failure::assertion(format!(
                "{}Expected return value: {}\nActual return value:   {}",
                run.header,
                describe(expected),
                describe(&run.value)
            )));
        }
        if must_output_args {
            if let Some(missing) = call.text_args().find(|arg| !run.stdout.contains(arg)) {
                return Err(Failure::assertion(format!(
                    "{}The argument value \"{missing}\" was supposed to appear in the output.\n\
                     The actual output was:\n{}",
                    run.header,
                    indent_lines(&run.stdout, 4)
                )));
            }
        }
        Ok(run.value)
    }

    /// Feed `input` to `func`, then check what it printed. The echoed
    /// input is part of the output.
    pub fn assert_output_equal_using_user_input<R>(
        &self,
        input: &str,
        output: &str,
        call: &Call,
        func: impl FnOnce() -> R,
    ) -> Result<R, Failure> {
        self.assert_output_equal_using_user_input_with(self.policy(), input, output, call, func)
    }

    pub fn assert_output_equal_using_user_input_with<R>(
        &self,
        policy: ComparisonPolicy,
        input: &str,
        output: &str,
        call: &Call,
        func: impl FnOnce() -> R,
    ) -> Result<R, Failure> {
        let run = run_with_input(input, call, func)?;
        check_output(&run.header, policy, output, &run.stdout, &run.input_ranges)?;
        Ok(run.value)
    }

    /// Run `body` where printing fails the test with `message`.
    ///
    /// With `print_func_okay` the print macros are tolerated and only
    /// direct stdout writes fail.
    pub fn assert_no_print<R>(
        &self,
        print_func_okay: bool,
        message: Option<&str>,
        body: impl FnOnce() -> R,
    ) -> Result<R, Failure> {
        let message = message.unwrap_or(DEFAULT_NO_PRINT_MESSAGE);
        forbid_output(print_func_okay, body).map_err(|interrupt| match interrupt {
            Interrupt::Violation(violation) if violation.kind.is_output() => {
                Failure::new(FailureKind::CaptureViolation, message)
            }
            other => interrupted("", other),
        })
    }

    /// Run `body` where reading input fails the test with `message`.
    pub fn assert_no_input<R>(&self, message: Option<&str>, body: impl FnOnce() -> R) -> Result<R, Failure> {
        let message = message.unwrap_or(DEFAULT_NO_INPUT_MESSAGE);
        forbid_input(body).map_err(|interrupt| match interrupt {
            Interrupt::Violation(violation) if !violation.kind.is_output() => {
                Failure::new(FailureKind::CaptureViolation, message)
            }
            Interrupt::InputExhausted => Failure::new(FailureKind::CaptureViolation, message),
            other => interrupted("", other),
        })
    }
}

fn run_with_input<R>(input: &str, call: &Call, func: impl FnOnce() -> R) -> Result<InputRun<R>, Failure> {
    let header = format!(
        "{}The 'user' typed:\n{}\n",
        call_header(call),
        indent_lines(input, 4)
    );
    let captured = capture(Some(input), func);
    let value = captured
        .outcome
        .map_err(|interrupt| interrupted(&header, interrupt))?;

    if !input.is_empty() && !captured.consumed_any {
        return Err(Failure::new(
            FailureKind::IncompleteInput,
            format!("{header}You did not read any input at all."),
        ));
    }
    if !captured.consumed_fully {
        let consumed = &input[..input.len() - captured.stdin_remaining.len()];
        let last_line = consumed.trim_end_matches('\n').rsplit('\n').next().unwrap_or_default();
        return Err(Failure::new(
            FailureKind::IncompleteInput,
            format!(
                "{header}Not all of that input was used, you stopped reading input once you got:\n{}",
                indent_lines(last_line, 4)
            ),
        ));
    }

    Ok(InputRun {
        header,
        value,
        stdout: captured.stdout.trim_end().to_string(),
        input_ranges: captured.input_ranges,
    })
}

fn check_output(
    header: &str,
    policy: ComparisonPolicy,
    expected: &str,
    actual: &str,
    input_ranges: &[Range<usize>],
) -> Result<(), Failure> {
    let comparison = OutputComparator::new(policy)
        .compare_with_input(expected, actual, input_ranges)
        .map_err(|err| Failure::harness(format!("{header}{err}")))?;
    match comparison.explanation {
        Some(explanation) if !comparison.matched => {
            Err(Failure::assertion(format!("{header}{explanation}")))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "io_asserts_tests.rs"]
mod tests;
