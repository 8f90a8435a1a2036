// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Indentation helpers for failure messages.

/// Prefix every line of `text` with `spaces` spaces. Empty text stays empty.
pub fn indent_lines(text: &str, spaces: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep `text` inline when `inline` is set, otherwise move it onto its own
/// indented lines.
pub fn indent_lines_maybe(text: &str, spaces: usize, inline: bool) -> String {
    if inline {
        text.to_string()
    } else {
        format!("\n{}", indent_lines(text, spaces))
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
