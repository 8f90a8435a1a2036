// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text emphasis drawn with Unicode.
//!
//! Failure messages are plain text, so emphasis is encoded in the text
//! itself: every emphasized character is preceded by a marker. Underlined
//! text is what the output is missing, struck-through text is what it has
//! extra, and bold text is what the "user" typed. Bold letters and digits
//! are also swapped for their mathematical sans-serif bold forms so they
//! stand out in a terminal. [`is_marker`] and [`debold`] let renderers
//! undo the encoding.

use std::ops::Range;

/// Precedes each bold character (word joiner, zero width).
pub const BOLD_MARK: char = '\u{2060}';
/// Precedes each underlined character (combining double low line).
pub const UNDERLINE_MARK: char = '\u{0333}';
/// Precedes each struck-through character (combining tilde overlay).
pub const STRIKE_MARK: char = '\u{0334}';

const BOLD_DIGIT_ZERO: u32 = 120_812;
const BOLD_UPPER_A: u32 = 120_276;
const BOLD_LOWER_A: u32 = 120_302;

pub fn is_marker(ch: char) -> bool {
    matches!(ch, BOLD_MARK | UNDERLINE_MARK | STRIKE_MARK)
}

fn marked(text: &str, mark: char) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for ch in text.chars() {
        out.push(mark);
        out.push(ch);
    }
    out
}

pub fn underline(text: &str) -> String {
    marked(text, UNDERLINE_MARK)
}

pub fn strikethrough(text: &str) -> String {
    marked(text, STRIKE_MARK)
}

fn bold_char(ch: char) -> char {
    let shifted = match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32 + BOLD_DIGIT_ZERO),
        'A'..='Z' => Some(ch as u32 - 'A' as u32 + BOLD_UPPER_A),
        'a'..='z' => Some(ch as u32 - 'a' as u32 + BOLD_LOWER_A),
        _ => None,
    };
    shifted.and_then(char::from_u32).unwrap_or(ch)
}

/// Bold ASCII letters and digits; every character gets the bold marker.
pub fn bold(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 5);
    for ch in text.chars() {
        out.push(BOLD_MARK);
        out.push(bold_char(ch));
    }
    out
}

/// Map a mathematical bold letter or digit back to ASCII.
pub fn debold_char(ch: char) -> char {
    let code = ch as u32;
    let plain = if (BOLD_DIGIT_ZERO..BOLD_DIGIT_ZERO + 10).contains(&code) {
        Some(code - BOLD_DIGIT_ZERO + '0' as u32)
    } else if (BOLD_UPPER_A..BOLD_UPPER_A + 26).contains(&code) {
        Some(code - BOLD_UPPER_A + 'A' as u32)
    } else if (BOLD_LOWER_A..BOLD_LOWER_A + 26).contains(&code) {
        Some(code - BOLD_LOWER_A + 'a' as u32)
    } else {
        None
    };
    plain.and_then(char::from_u32).unwrap_or(ch)
}

/// Strip all emphasis, recovering the plain text.
pub fn debold(text: &str) -> String {
    text.chars()
        .filter(|ch| !is_marker(*ch))
        .map(debold_char)
        .collect()
}

/// Bold the given byte ranges of `text`.
///
/// Ranges past the end of `text` are clipped and ranges that do not fall
/// on character boundaries are left plain.
pub fn bold_ranges(text: &str, ranges: &[Range<usize>]) -> String {
    let mut sorted: Vec<Range<usize>> = ranges.to_vec();
    sorted.sort_by_key(|range| range.start);

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for range in sorted {
        let start = range.start.max(pos);
        let end = range.end.min(text.len());
        if start >= end {
            continue;
        }
        let (Some(before), Some(inside)) = (text.get(pos..start), text.get(start..end)) else {
            continue;
        };
        out.push_str(before);
        out.push_str(&bold(inside));
        pos = end;
    }
    out.push_str(text.get(pos..).unwrap_or_default());
    out
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
