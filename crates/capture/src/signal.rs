// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Panic payloads used to unwind out of student code.
//!
//! Capture scopes stop a callable by panicking with one of the payload
//! types below. The scope that raised a payload is the only one allowed
//! to claim it; every other scope lets it keep unwinding.

use std::any::Any;
use std::fmt;
use thiserror::Error;

use crate::panic_hook;

/// Identifier of a capture scope, unique for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) u64);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a guarded scope caught the callable doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// The print primitive was called.
    Print,
    /// Stdout was written directly.
    StdoutWrite,
    /// Stdin was read.
    InputRead,
}

impl ViolationKind {
    /// Whether the violation concerns output rather than input.
    pub fn is_output(&self) -> bool {
        matches!(self, ViolationKind::Print | ViolationKind::StdoutWrite)
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Print => write!(f, "print called"),
            ViolationKind::StdoutWrite => write!(f, "stdout written"),
            ViolationKind::InputRead => write!(f, "unexpected input read"),
        }
    }
}

/// Raised when code writes or reads where the active scope forbids it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("capture violation in scope {scope}: {kind}")]
pub struct CaptureViolation {
    pub scope: ScopeId,
    pub kind: ViolationKind,
}

/// Raised when `input()` is called after scripted input ran out.
///
/// `scope` is `None` when the real stdin hit end of file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputExhausted {
    pub scope: Option<ScopeId>,
}

/// Raised on a worker thread whose deadline has already passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aborted;

/// Why a captured callable did not return normally.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Interrupt {
    #[error("{0}")]
    Violation(CaptureViolation),

    #[error("input was read after all of it had been consumed")]
    InputExhausted,

    #[error("panicked: {message}")]
    Panic {
        message: String,
        location: Option<String>,
    },
}

impl Interrupt {
    /// Classify a caught panic payload raised on the current thread.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        Self::from_payload_at(payload, panic_hook::take_location())
    }

    /// Classify a caught panic payload with an already-known location.
    pub fn from_payload_at(payload: Box<dyn Any + Send>, location: Option<String>) -> Self {
        if let Some(violation) = payload.downcast_ref::<CaptureViolation>() {
            return Interrupt::Violation(violation.clone());
        }
        if payload.is::<InputExhausted>() {
            return Interrupt::InputExhausted;
        }
        Interrupt::Panic {
            message: panic_message(payload.as_ref()),
            location,
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else if payload.is::<Aborted>() {
        "aborted after the deadline passed".to_string()
    } else {
        "unknown panic".to_string()
    }
}

/// Whether a payload is one of the harness' own control signals.
pub(crate) fn is_signal(payload: &(dyn Any + Send)) -> bool {
    payload.is::<CaptureViolation>() || payload.is::<InputExhausted>() || payload.is::<Aborted>()
}

/// The scope a signal payload belongs to, if it is scope-bound.
pub(crate) fn owning_scope(payload: &(dyn Any + Send)) -> Option<ScopeId> {
    if let Some(violation) = payload.downcast_ref::<CaptureViolation>() {
        return Some(violation.scope);
    }
    payload
        .downcast_ref::<InputExhausted>()
        .and_then(|exhausted| exhausted.scope)
}

pub(crate) fn raise<T: Any + Send + 'static>(payload: T) -> ! {
    std::panic::panic_any(payload)
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
