// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Running callables inside capture scopes.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use crate::scope::{CaptureScope, InputMode, OutputMode};
use crate::signal::{owning_scope, Aborted, Interrupt, ScopeId};

/// Everything observed while running one captured callable.
#[derive(Debug)]
pub struct CapturedCall<R> {
    /// Recorded output, echoed input included.
    pub stdout: String,
    /// Scripted input that was never read.
    pub stdin_remaining: String,
    /// Whether any scripted input was read.
    pub consumed_any: bool,
    /// Whether all scripted input was read. Vacuously true without input.
    pub consumed_fully: bool,
    /// Byte ranges of `stdout` that are echoed input.
    pub input_ranges: Vec<Range<usize>>,
    /// The return value, or why there is none.
    pub outcome: Result<R, Interrupt>,
}

impl<R> CapturedCall<R> {
    pub fn return_value(&self) -> Option<&R> {
        self.outcome.as_ref().ok()
    }

    pub fn raised(&self) -> Option<&Interrupt> {
        self.outcome.as_ref().err()
    }
}

/// Run `f` with output recorded and input served from `input`.
///
/// Without `input`, every read is an "unexpected input read" violation.
pub fn capture<R>(input: Option<&str>, f: impl FnOnce() -> R) -> CapturedCall<R> {
    let input_mode = match input {
        Some(text) => InputMode::Script(text.to_string()),
        None => InputMode::Deny,
    };
    let scope = CaptureScope::new(OutputMode::Record, input_mode);
    let outcome = run_in(&scope, f);
    let stdin_remaining = scope.input_remaining();
    CapturedCall {
        stdout: scope.output(),
        consumed_any: scope.input_consumed() > 0,
        consumed_fully: stdin_remaining.is_empty(),
        stdin_remaining,
        input_ranges: scope.input_ranges(),
        outcome,
    }
}

/// Run `f` where writes are violations; input is left to the enclosing layer.
pub fn forbid_output<R>(print_func_okay: bool, f: impl FnOnce() -> R) -> Result<R, Interrupt> {
    let scope = CaptureScope::new(OutputMode::Forbid { print_func_okay }, InputMode::Inherit);
    run_in(&scope, f)
}

/// Run `f` where reads are violations; output is left to the enclosing layer.
pub fn forbid_input<R>(f: impl FnOnce() -> R) -> Result<R, Interrupt> {
    let scope = CaptureScope::new(OutputMode::Inherit, InputMode::Deny);
    run_in(&scope, f)
}

/// Run `f` with `scope` pushed, claiming the signals that scope raised.
///
/// Signals raised by other scopes, and aborts, keep unwinding so their
/// owners can claim them.
pub fn run_in<R>(scope: &CaptureScope, f: impl FnOnce() -> R) -> Result<R, Interrupt> {
    let result = {
        let _guard = scope.enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    result.map_err(|payload| claim(scope.id(), payload))
}

fn claim(scope: ScopeId, payload: Box<dyn std::any::Any + Send>) -> Interrupt {
    if payload.is::<Aborted>() {
        panic::resume_unwind(payload);
    }
    if let Some(owner) = owning_scope(payload.as_ref()) {
        if owner != scope {
            panic::resume_unwind(payload);
        }
    }
    Interrupt::from_payload(payload)
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
