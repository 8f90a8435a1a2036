// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rstest::rstest;

#[rstest]
#[case("", 4, "")]
#[case("one", 2, "  one")]
#[case("a\nb", 4, "    a\n    b")]
#[case("a\nb\n", 1, " a\n b")]
#[case("a\n\nb", 2, "  a\n  \n  b")]
fn test_indent_lines(#[case] text: &str, #[case] spaces: usize, #[case] expected: &str) {
    assert_eq!(indent_lines(text, spaces), expected);
}

#[test]
fn test_indent_lines_maybe_inline() {
    assert_eq!(indent_lines_maybe("x", 4, true), "x");
}

#[test]
fn test_indent_lines_maybe_block() {
    assert_eq!(indent_lines_maybe("x\ny", 4, false), "\n    x\n    y");
}
