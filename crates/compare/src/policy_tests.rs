// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use yare::parameterized;

#[test]
fn test_default_is_relaxed_ordered_literal() {
    let policy = ComparisonPolicy::default();
    assert_eq!(policy.whitespace, Whitespace::Relaxed);
    assert!(policy.ordered);
    assert!(!policy.regexp);
}

#[test]
fn test_builders() {
    let policy = ComparisonPolicy::strict().ordered(false).regexp(true);
    assert_eq!(
        policy,
        ComparisonPolicy {
            whitespace: Whitespace::Strict,
            ordered: false,
            regexp: true,
        }
    );
}

#[test]
fn test_deserialize_partial_table_fills_defaults() {
    let policy: ComparisonPolicy = toml::from_str("whitespace = \"ignore\"").unwrap();
    assert_eq!(policy.whitespace, Whitespace::Ignore);
    assert!(policy.ordered);
}

#[test]
fn test_deserialize_rejects_unknown_fields() {
    let result: Result<ComparisonPolicy, _> = toml::from_str("case_sensitive = false");
    assert!(result.is_err());
}

#[parameterized(
    strict = { Whitespace::Strict, "strict" },
    relaxed = { Whitespace::Relaxed, "relaxed" },
    ignore = { Whitespace::Ignore, "ignore" },
)]
fn test_whitespace_display(mode: Whitespace, expected: &str) {
    assert_eq!(mode.to_string(), expected);
}
