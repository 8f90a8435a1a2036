// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture scopes and the per-thread redirection stack.

use parking_lot::Mutex;
use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::marker::PhantomData;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::signal::{raise, CaptureViolation, InputExhausted, ScopeId, ViolationKind};

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static STACK: RefCell<Vec<CaptureScope>> = const { RefCell::new(Vec::new()) };
}

/// How a scope treats writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Record everything written.
    Record,
    /// Any write is a violation. With `print_func_okay` the print
    /// primitive is tolerated and forwarded to the enclosing layer.
    Forbid { print_func_okay: bool },
    /// Leave output to the enclosing layer.
    Inherit,
}

/// How a scope treats reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Serve reads from this text.
    Script(String),
    /// Any read is a violation.
    Deny,
    /// Leave input to the enclosing layer.
    Inherit,
}

/// Which facade primitive produced a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Channel {
    Print,
    Write,
}

#[derive(Debug)]
struct InputCursor {
    text: String,
    pos: usize,
}

impl InputCursor {
    fn read_line(&mut self) -> Option<String> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let end = rest.find('\n').map(|i| i + 1).unwrap_or(rest.len());
        let line = rest[..end].to_string();
        self.pos += end;
        Some(line)
    }

    fn remaining(&self) -> &str {
        &self.text[self.pos..]
    }
}

#[derive(Debug)]
enum InputState {
    Script(InputCursor),
    Deny,
    Inherit,
}

#[derive(Debug)]
struct ScopeState {
    output_mode: OutputMode,
    output: String,
    input: InputState,
    input_ranges: Vec<Range<usize>>,
}

/// A single layer of stdio redirection.
///
/// Cloning yields another handle to the same buffers, which is how a
/// worker thread and its caller share captured output.
#[derive(Clone, Debug)]
pub struct CaptureScope {
    id: ScopeId,
    state: Arc<Mutex<ScopeState>>,
}

impl CaptureScope {
    pub fn new(output_mode: OutputMode, input_mode: InputMode) -> Self {
        let input = match input_mode {
            InputMode::Script(text) => InputState::Script(InputCursor { text, pos: 0 }),
            InputMode::Deny => InputState::Deny,
            InputMode::Inherit => InputState::Inherit,
        };
        Self {
            id: ScopeId(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)),
            state: Arc::new(Mutex::new(ScopeState {
                output_mode,
                output: String::new(),
                input,
                input_ranges: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Push this scope onto the current thread's stack.
    pub fn enter(&self) -> ScopeGuard {
        let depth = STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(self.clone());
            stack.len() - 1
        });
        tracing::trace!(scope = %self.id, depth, "entered capture scope");
        ScopeGuard {
            depth,
            _not_send: PhantomData,
        }
    }

    /// Everything recorded so far, echoed input included.
    pub fn output(&self) -> String {
        self.state.lock().output.clone()
    }

    /// Scripted input not yet read. Empty for non-scripted scopes.
    pub fn input_remaining(&self) -> String {
        match &self.state.lock().input {
            InputState::Script(cursor) => cursor.remaining().to_string(),
            InputState::Deny | InputState::Inherit => String::new(),
        }
    }

    /// Bytes of scripted input read so far.
    pub fn input_consumed(&self) -> usize {
        match &self.state.lock().input {
            InputState::Script(cursor) => cursor.pos,
            InputState::Deny | InputState::Inherit => 0,
        }
    }

    /// Byte ranges of the recorded output that were echoed input.
    pub fn input_ranges(&self) -> Vec<Range<usize>> {
        self.state.lock().input_ranges.clone()
    }
}

/// Pops a scope (and anything pushed above it) when dropped.
///
/// Truncating to the recorded depth means an inner scope that was never
/// popped cannot keep an outer restoration from happening.
#[must_use = "the scope is popped as soon as the guard is dropped"]
pub struct ScopeGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let depth = self.depth;
        let _ = STACK.try_with(|stack| stack.borrow_mut().truncate(depth));
        tracing::trace!(depth, "left capture scope");
    }
}

/// Replaces the current thread's stack for the life of the guard.
pub(crate) struct InheritedStack {
    _not_send: PhantomData<*const ()>,
}

impl Drop for InheritedStack {
    fn drop(&mut self) {
        let _ = STACK.try_with(|stack| stack.borrow_mut().clear());
    }
}

/// Handles to every scope active on the current thread, innermost last.
pub(crate) fn snapshot() -> Vec<CaptureScope> {
    STACK.with(|stack| stack.borrow().clone())
}

pub(crate) fn inherit(scopes: Vec<CaptureScope>) -> InheritedStack {
    STACK.with(|stack| *stack.borrow_mut() = scopes);
    InheritedStack {
        _not_send: PhantomData,
    }
}

/// Route a write to the innermost layer that handles output.
pub(crate) fn emit(text: &str, channel: Channel) {
    for scope in snapshot().iter().rev() {
        let mut state = scope.state.lock();
        let mode = state.output_mode;
        match mode {
            OutputMode::Record => {
                state.output.push_str(text);
                return;
            }
            OutputMode::Inherit => continue,
            OutputMode::Forbid {
                print_func_okay: true,
            } if channel == Channel::Print => continue,
            OutputMode::Forbid { .. } => {
                drop(state);
                let kind = match channel {
                    Channel::Print => ViolationKind::Print,
                    Channel::Write => ViolationKind::StdoutWrite,
                };
                raise(CaptureViolation {
                    scope: scope.id,
                    kind,
                });
            }
        }
    }
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
}

/// Flush the real stdout. Recorded output needs no flushing.
pub(crate) fn flush() {
    let _ = std::io::stdout().flush();
}

/// Read one line (terminator included) from the innermost input layer.
///
/// The prompt is written first, but only after the input layer has been
/// found to allow reads. Returns `Err` with the exhausted-input signal
/// when there is nothing left to read.
pub(crate) fn read_line(prompt: Option<&str>) -> Result<String, InputExhausted> {
    let stack = snapshot();
    let layer = stack.iter().rev().find(|scope| {
        !matches!(scope.state.lock().input, InputState::Inherit)
    });

    if let Some(scope) = layer {
        if matches!(scope.state.lock().input, InputState::Deny) {
            raise(CaptureViolation {
                scope: scope.id,
                kind: ViolationKind::InputRead,
            });
        }
    }

    if let Some(prompt) = prompt.filter(|p| !p.is_empty()) {
        emit(prompt, Channel::Write);
    }

    match layer {
        Some(scope) => {
            let mut state = scope.state.lock();
            let line = match &mut state.input {
                InputState::Script(cursor) => cursor.read_line(),
                InputState::Deny | InputState::Inherit => None,
            };
            let Some(line) = line else {
                return Err(InputExhausted {
                    scope: Some(scope.id),
                });
            };
            // Echo as a terminal would, so transcripts show what was typed.
            if state.output_mode == OutputMode::Record {
                let start = state.output.len();
                state.output.push_str(&line);
                state.input_ranges.push(start..start + line.len());
            }
            Ok(line)
        }
        None => {
            let mut line = String::new();
            match std::io::stdin().lock().read_line(&mut line) {
                Ok(n) if n > 0 => Ok(line),
                _ => Err(InputExhausted { scope: None }),
            }
        }
    }
}

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;
