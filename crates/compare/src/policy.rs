// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison policy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How whitespace differences are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Whitespace {
    /// Byte-for-byte.
    Strict,
    /// Runs of whitespace collapse to one space, lines are trimmed and
    /// trailing blank lines are dropped.
    #[default]
    Relaxed,
    /// All whitespace is removed.
    Ignore,
}

impl fmt::Display for Whitespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Whitespace::Strict => write!(f, "strict"),
            Whitespace::Relaxed => write!(f, "relaxed"),
            Whitespace::Ignore => write!(f, "ignore"),
        }
    }
}

/// Rules for one comparison. Defaults to relaxed, ordered and literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonPolicy {
    pub whitespace: Whitespace,
    pub ordered: bool,
    pub regexp: bool,
}

impl Default for ComparisonPolicy {
    fn default() -> Self {
        Self {
            whitespace: Whitespace::Relaxed,
            ordered: true,
            regexp: false,
        }
    }
}

impl ComparisonPolicy {
    pub fn strict() -> Self {
        Self::default().whitespace(Whitespace::Strict)
    }

    pub fn whitespace(mut self, whitespace: Whitespace) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    pub fn regexp(mut self, regexp: bool) -> Self {
        self.regexp = regexp;
        self
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
