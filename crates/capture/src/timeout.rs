// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline-bounded execution on a worker thread.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::panic_hook;
use crate::scope;
use crate::signal::{owning_scope, raise, Aborted, Interrupt};

/// Deadline applied when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

thread_local! {
    static ABORT: RefCell<Option<AbortSignal>> = const { RefCell::new(None) };
}

/// Shared flag telling an abandoned worker to stop.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Unwind the current thread if its deadline has passed.
pub(crate) fn check_abort() {
    let aborted = ABORT
        .try_with(|slot| slot.borrow().as_ref().is_some_and(AbortSignal::is_triggered))
        .unwrap_or(false);
    if aborted {
        raise(Aborted);
    }
}

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("timed out after {}", format_deadline(.0))]
    Timeout(Duration),

    #[error("{0}")]
    Interrupted(Interrupt),

    #[error("failed to start worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("failed to wait for worker process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("worker thread exited without reporting a result")]
    Disconnected,
}

/// Render a deadline the way reports show it ("1s", "250ms").
pub fn format_deadline(deadline: &Duration) -> String {
    if deadline.subsec_millis() == 0 {
        format!("{}s", deadline.as_secs())
    } else {
        format!("{}ms", deadline.as_millis())
    }
}

type WorkerResult<R> = Result<R, (Box<dyn Any + Send>, Option<String>)>;

/// Runs callables under a wall-clock deadline.
///
/// The callable runs on its own thread, which inherits the caller's capture
/// stack so its output lands in the caller's scopes. When the deadline
/// passes the worker is abandoned and its abort signal raised; its next
/// call into the stdio facade unwinds it.
#[derive(Clone, Copy, Debug)]
pub struct TimeoutExecutor {
    deadline: Duration,
}

impl Default for TimeoutExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl TimeoutExecutor {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Run `f`, waiting at most the deadline for it to finish.
    ///
    /// Capture signals belonging to one of the caller's scopes are
    /// re-raised on the calling thread so that scope can claim them.
    pub fn run<F, R>(&self, f: F) -> Result<R, ExecError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let inherited = scope::snapshot();
        let inherited_ids: HashSet<_> = inherited.iter().map(|s| s.id()).collect();
        let abort = AbortSignal::new();
        let worker_abort = abort.clone();
        let (tx, rx) = mpsc::channel::<WorkerResult<R>>();
        let started = Instant::now();

        thread::Builder::new()
            .name("helpfultests-worker".to_string())
            .spawn(move || {
                let _stack = scope::inherit(inherited);
                let _ = ABORT.try_with(|slot| *slot.borrow_mut() = Some(worker_abort));
                let result = panic::catch_unwind(AssertUnwindSafe(f))
                    .map_err(|payload| (payload, panic_hook::take_location()));
                // The receiver is gone if the deadline already passed.
                let _ = tx.send(result);
            })?;

        match rx.recv_timeout(self.deadline) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err((payload, location))) => {
                if owning_scope(payload.as_ref()).is_some_and(|id| inherited_ids.contains(&id)) {
                    panic::resume_unwind(payload);
                }
                Err(ExecError::Interrupted(Interrupt::from_payload_at(
                    payload, location,
                )))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                abort.trigger();
                tracing::warn!(
                    deadline_ms = self.deadline.as_millis() as u64,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "callable exceeded its deadline; worker abandoned"
                );
                Err(ExecError::Timeout(self.deadline))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ExecError::Disconnected),
        }
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
