// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The output comparator.

use regex::Regex;
use std::ops::Range;
use thiserror::Error;

use crate::diff::{diff_line, diff_lines};
use crate::markup::bold_ranges;
use crate::normalize::normalize_lines;
use crate::policy::{ComparisonPolicy, Whitespace};
use crate::text::{indent_lines, indent_lines_maybe};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("invalid expected pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Result of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub matched: bool,
    /// Set when the texts did not match.
    pub explanation: Option<String>,
}

impl Comparison {
    fn matched() -> Self {
        Self {
            matched: true,
            explanation: None,
        }
    }
}

/// Compares expected and actual output under a [`ComparisonPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputComparator {
    policy: ComparisonPolicy,
}

impl OutputComparator {
    pub fn new(policy: ComparisonPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ComparisonPolicy {
        self.policy
    }

    pub fn compare(&self, expected: &str, actual: &str) -> Result<Comparison, CompareError> {
        self.compare_with_input(expected, actual, &[])
    }

    /// Compare, knowing which byte ranges of `actual` are echoed input.
    ///
    /// The ranges only affect the explanation, where that text is bolded.
    pub fn compare_with_input(
        &self,
        expected: &str,
        actual: &str,
        input_ranges: &[Range<usize>],
    ) -> Result<Comparison, CompareError> {
        let mut expected_lines = normalize_lines(expected, self.policy.whitespace);
        let mut actual_lines = normalize_lines(actual, self.policy.whitespace);
        if !self.policy.ordered {
            expected_lines.sort();
            actual_lines.sort();
        }

        let matched = match (self.policy.regexp, self.policy.ordered) {
            (false, _) => expected_lines == actual_lines,
            (true, true) => {
                compile(&expected_lines.join("\n"))?.is_match(&actual_lines.join("\n"))
            }
            (true, false) => lines_match_patterns(&expected_lines, &actual_lines)?,
        };
        if matched {
            return Ok(Comparison::matched());
        }

        let explanation =
            self.explain(expected, actual, input_ranges, &expected_lines, &actual_lines);
        Ok(Comparison {
            matched: false,
            explanation: Some(explanation),
        })
    }

    fn explain(
        &self,
        expected: &str,
        actual: &str,
        input_ranges: &[Range<usize>],
        expected_lines: &[String],
        actual_lines: &[String],
    ) -> String {
        let single_line = !expected.contains('\n') && !actual.contains('\n');
        let expected_note = if self.policy.regexp {
            " (this is a regular-expression, so will likely look cryptic)"
        } else {
            ""
        };
        let (shown_actual, actual_note) = if input_ranges.is_empty() {
            (actual.to_string(), "")
        } else {
            (
                bold_ranges(actual, input_ranges),
                " (green text is user entered)",
            )
        };

        let mut out = format!(
            "Expected output{expected_note}: {}",
            indent_lines_maybe(expected, 4, single_line)
        );
        out.push_str(&format!(
            "\nActual output{actual_note}: {}",
            indent_lines_maybe(&shown_actual, 4, single_line)
        ));

        if !self.policy.regexp && self.policy.whitespace != Whitespace::Ignore {
            let diff = if single_line {
                diff_line(&actual_lines.join("\n"), &expected_lines.join("\n"))
            } else {
                diff_lines(actual_lines, expected_lines).join("\n")
            };
            out.push_str(
                "\nDifference (\u{0333}  are things your output is missing, \
                 \u{0334}  are things your output has extra):\n",
            );
            out.push_str(&indent_lines(&diff, 4));
        }

        if self.policy.whitespace == Whitespace::Ignore {
            out.push_str("\nNote: all whitespace is ignored");
        }
        if !self.policy.ordered {
            out.push_str("\nNote: order of the lines does not matter");
        }
        out
    }
}

fn compile(pattern: &str) -> Result<Regex, CompareError> {
    Regex::new(pattern).map_err(|err| CompareError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

/// Each pattern must match a distinct line, and no line may be left over.
///
/// Finds a perfect pattern-to-line assignment with augmenting paths, so a
/// broad pattern never starves a narrower one of the only line it matches.
fn lines_match_patterns(patterns: &[String], lines: &[String]) -> Result<bool, CompareError> {
    if patterns.len() != lines.len() {
        return Ok(false);
    }
    let mut matches = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let regex = compile(pattern)?;
        matches.push(lines.iter().map(|line| regex.is_match(line)).collect::<Vec<_>>());
    }

    // owner[line] is the pattern currently assigned to that line.
    let mut owner: Vec<Option<usize>> = vec![None; lines.len()];
    for pattern in 0..patterns.len() {
        let mut visited = vec![false; lines.len()];
        if !augment(pattern, &matches, &mut owner, &mut visited) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn augment(
    pattern: usize,
    matches: &[Vec<bool>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for line in 0..owner.len() {
        if !matches[pattern][line] || visited[line] {
            continue;
        }
        visited[line] = true;
        let free = match owner[line] {
            None => true,
            Some(other) => augment(other, matches, owner, visited),
        };
        if free {
            owner[line] = Some(pattern);
            return true;
        }
    }
    false
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
