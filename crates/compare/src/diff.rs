// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Marked-up differences between actual and expected text.
//!
//! Both functions describe how to turn the *actual* text into the
//! *expected* one: text the actual output has extra is struck through and
//! text it is missing is underlined.

use similar::{Algorithm, DiffTag, TextDiff};

use crate::markup::{strikethrough, underline};

/// Share of a line that must survive for a changed line to be shown as an
/// in-line edit rather than as a removed line plus an added one.
const LINE_SIMILARITY: f32 = 0.5;

/// Character-level difference of `actual` against `expected`.
pub fn diff_line(actual: &str, expected: &str) -> String {
    diff_line_within(actual, expected, 0.0).unwrap_or_default()
}

/// Like [`diff_line`], but `None` when the similarity ratio is at or below
/// `limit`. A limit of zero never gives up.
pub fn diff_line_within(actual: &str, expected: &str, limit: f32) -> Option<String> {
    let diff = TextDiff::from_chars(actual, expected);
    if limit > 0.0 && limit >= diff.ratio() {
        return None;
    }
    let old = diff.old_slices();
    let new = diff.new_slices();
    let mut out = String::new();
    for op in diff.ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let removed = old[old_range].concat();
        let added = new[new_range].concat();
        match tag {
            DiffTag::Equal => out.push_str(&removed),
            DiffTag::Delete => out.push_str(&strikethrough(&removed)),
            DiffTag::Insert => out.push_str(&underline(&added)),
            DiffTag::Replace => {
                out.push_str(&strikethrough(&removed));
                out.push_str(&underline(&added));
            }
        }
    }
    Some(out)
}

/// Line-level difference; changed lines that are similar enough get a
/// character-level difference of their own.
pub fn diff_lines<S: AsRef<str>>(actual: &[S], expected: &[S]) -> Vec<String> {
    let old: Vec<&str> = actual.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = expected.iter().map(AsRef::as_ref).collect();
    let mut out = Vec::with_capacity(old.len().max(new.len()));

    for op in similar::capture_diff_slices(Algorithm::Myers, &old, &new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let removed = &old[old_range];
        let added = &new[new_range];
        match tag {
            DiffTag::Equal => out.extend(removed.iter().map(|line| line.to_string())),
            DiffTag::Delete => out.extend(removed.iter().map(|line| strikethrough(line))),
            DiffTag::Insert => out.extend(added.iter().map(|line| underline(line))),
            DiffTag::Replace => {
                for (a, b) in removed.iter().zip(added) {
                    match diff_line_within(a, b, LINE_SIMILARITY) {
                        Some(edited) => out.push(edited),
                        None => {
                            out.push(strikethrough(a));
                            out.push(underline(b));
                        }
                    }
                }
                let paired = removed.len().min(added.len());
                out.extend(removed[paired..].iter().map(|line| strikethrough(line)));
                out.extend(added[paired..].iter().map(|line| underline(line)));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
