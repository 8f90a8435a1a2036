// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output comparison for helpfultests.
//!
//! [`OutputComparator`] decides whether captured output matches an
//! expectation under a [`ComparisonPolicy`] and, when it does not, builds
//! the explanation shown to the student: both texts, and a character-level
//! difference drawn with Unicode combining marks (see [`markup`]).

mod compare;
mod diff;
pub mod markup;
mod normalize;
mod policy;
mod text;

pub use compare::{CompareError, Comparison, OutputComparator};
pub use diff::{diff_line, diff_line_within, diff_lines};
pub use normalize::normalize_lines;
pub use policy::{ComparisonPolicy, Whitespace};
pub use text::{indent_lines, indent_lines_maybe};
