// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped stdio capture and deadline-bounded execution.
//!
//! Student code talks to the console through the facade in this crate
//! ([`cprint!`], [`cprintln!`], [`write_stdout`], [`input`], [`read_line`]).
//! Outside a capture scope the facade forwards to the real process stdio.
//! Inside one it is redirected: output is recorded or forbidden, input is
//! scripted or forbidden.
//!
//! Scopes form a per-thread stack managed by RAII guards, so the previous
//! redirection is restored on every exit path. [`TimeoutExecutor`] runs a
//! callable on a worker thread that inherits the caller's stack, which is
//! how captured output crosses back to the caller. [`ProcessExecutor`]
//! is the hard boundary: code that never reaches the facade can only be
//! stopped by killing the process it runs in.

mod capture;
mod panic_hook;
mod process;
mod scope;
mod signal;
mod stdio;
mod timeout;

pub use capture::{capture, forbid_input, forbid_output, run_in, CapturedCall};
pub use panic_hook::QuietPanicHook;
pub use process::{ProcessExecutor, ProcessOutput};
pub use scope::{CaptureScope, InputMode, OutputMode, ScopeGuard};
pub use signal::{
    panic_message, Aborted, CaptureViolation, InputExhausted, Interrupt, ScopeId, ViolationKind,
};
pub use stdio::{flush, input, print_fmt, read_line, write_stdout};
pub use timeout::{format_deadline, AbortSignal, ExecError, TimeoutExecutor, DEFAULT_TIMEOUT};
