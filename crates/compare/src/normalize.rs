// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Whitespace normalization.

use crate::policy::Whitespace;

/// Normalize `text` under `mode` and split it into lines.
///
/// `Ignore` yields a single line with every whitespace character removed.
/// `Relaxed` may yield no lines at all for blank text.
pub fn normalize_lines(text: &str, mode: Whitespace) -> Vec<String> {
    match mode {
        Whitespace::Strict => text.split('\n').map(str::to_string).collect(),
        Whitespace::Relaxed => {
            let mut lines: Vec<String> = text
                .split('\n')
                .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                .collect();
            while lines.last().is_some_and(String::is_empty) {
                lines.pop();
            }
            lines
        }
        Whitespace::Ignore => vec![text.chars().filter(|c| !c.is_whitespace()).collect()],
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
