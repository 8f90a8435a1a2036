// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering values inside failure messages.

use helpfultests_compare::indent_lines;
use std::fmt;

/// Renderings longer than this go on their own lines.
const INLINE_LIMIT: usize = 20;

/// Render a value for a failure message.
///
/// Short values stay inline. Long ones are pretty-printed on their own
/// indented lines so they line up under the label.
pub fn describe<T: fmt::Debug + ?Sized>(value: &T) -> String {
    let compact = format!("{value:?}");
    if compact.contains('\n') || compact.chars().count() > INLINE_LIMIT {
        format!("\n{}", indent_lines(&format!("{value:#?}"), 4))
    } else {
        compact
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
