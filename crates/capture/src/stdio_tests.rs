// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::capture::capture;
use crate::signal::Interrupt;
use rstest::rstest;

#[test]
fn test_print_macros_are_recorded() {
    let call = capture(None, || {
        crate::cprint!("{}-{}", 1, 2);
        crate::cprintln!();
        crate::cprintln!("done");
    });
    assert_eq!(call.stdout, "1-2\ndone\n");
}

#[test]
fn test_write_stdout_empty_is_noop() {
    let call = capture(None, || write_stdout(""));
    assert_eq!(call.stdout, "");
    assert!(call.outcome.is_ok());
}

#[rstest]
#[case("Ada\n", "Ada")]
#[case("Ada\r\n", "Ada")]
#[case("Ada", "Ada")]
#[case("\n", "")]
fn test_input_strips_line_terminator(#[case] script: &str, #[case] expected: &str) {
    let call = capture(Some(script), || input("> "));
    assert_eq!(call.outcome.unwrap(), expected);
}

#[test]
fn test_input_past_end_is_exhausted() {
    let call = capture(Some("one\n"), || {
        let first = input("");
        let second = input("again: ");
        (first, second)
    });
    assert_eq!(call.outcome, Err(Interrupt::InputExhausted));
    assert_eq!(call.stdout, "one\nagain: ");
}

#[test]
fn test_read_line_returns_empty_at_end() {
    let call = capture(Some("x\n"), || (read_line(), read_line()));
    assert_eq!(call.outcome.unwrap(), ("x\n".to_string(), String::new()));
}

#[test]
fn test_flush_inside_scope_is_harmless() {
    let call = capture(None, || {
        crate::cprint!("a");
        flush();
    });
    assert_eq!(call.stdout, "a");
    assert!(call.outcome.is_ok());
}
