// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Quiet panic hook for harness runs.

use std::cell::RefCell;
use std::panic::{self, PanicHookInfo};

use crate::signal::is_signal;

type Hook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

thread_local! {
    static LAST_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Replaces the process panic hook while alive.
///
/// The replacement prints nothing and remembers where the last panic on
/// each thread happened, so crash reports can point at the student's line.
/// Control signals raised by capture scopes are not recorded.
///
/// Dropping it restores the previous hook, filtered so that a signal
/// raised later by an abandoned worker stays silent.
pub struct QuietPanicHook {
    previous: Option<Hook>,
}

impl QuietPanicHook {
    pub fn install() -> Self {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(|info| {
            if is_signal(info.payload()) {
                return;
            }
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()));
            let _ = LAST_LOCATION.try_with(|slot| *slot.borrow_mut() = location);
        }));
        Self {
            previous: Some(previous),
        }
    }
}

impl Drop for QuietPanicHook {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            panic::set_hook(Box::new(move |info| {
                if !is_signal(info.payload()) {
                    previous(info);
                }
            }));
        }
    }
}

/// Take the location recorded for the most recent panic on this thread.
pub(crate) fn take_location() -> Option<String> {
    LAST_LOCATION
        .try_with(|slot| slot.borrow_mut().take())
        .ok()
        .flatten()
}

#[cfg(test)]
#[path = "panic_hook_tests.rs"]
mod tests;
