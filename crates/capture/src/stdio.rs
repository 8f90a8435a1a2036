// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console facade used by student code.

use std::fmt;

use crate::scope::{self, Channel};
use crate::signal::raise;
use crate::timeout::check_abort;

/// Print-primitive counterpart of `print!`.
#[macro_export]
macro_rules! cprint {
    ($($arg:tt)*) => {
        $crate::print_fmt(::std::format_args!($($arg)*))
    };
}

/// Print-primitive counterpart of `println!`.
#[macro_export]
macro_rules! cprintln {
    () => {
        $crate::print_fmt(::std::format_args!("\n"))
    };
    ($($arg:tt)*) => {
        $crate::print_fmt(::std::format_args!("{}\n", ::std::format_args!($($arg)*)))
    };
}

/// The print primitive. Prefer the [`cprint!`] and [`cprintln!`] macros.
pub fn print_fmt(args: fmt::Arguments<'_>) {
    check_abort();
    scope::emit(&args.to_string(), Channel::Print);
}

/// Write text straight to stdout, below the print primitive.
pub fn write_stdout(text: &str) {
    check_abort();
    if text.is_empty() {
        return;
    }
    scope::emit(text, Channel::Write);
}

pub fn flush() {
    check_abort();
    scope::flush();
}

/// Show `prompt`, then read one line without its terminator.
///
/// Unwinds with [`InputExhausted`](crate::InputExhausted) when there is no
/// input left, the way a terminal reports end of file.
pub fn input(prompt: &str) -> String {
    check_abort();
    match scope::read_line(Some(prompt)) {
        Ok(mut line) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            line
        }
        Err(exhausted) => raise(exhausted),
    }
}

/// Read one line including its terminator; empty at end of input.
pub fn read_line() -> String {
    check_abort();
    scope::read_line(None).unwrap_or_default()
}

#[cfg(test)]
#[path = "stdio_tests.rs"]
mod tests;
