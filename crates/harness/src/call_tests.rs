// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rstest::rstest;

#[test]
fn test_display_without_args() {
    assert_eq!(Call::new("hello::main").to_string(), "hello::main()");
}

#[test]
fn test_display_positional_and_keyword() {
    let call = Call::new("greet").arg("Ada").arg(3).kwarg("loud", true);
    assert_eq!(call.to_string(), r#"greet("Ada", 3, loud=true)"#);
}

#[test]
fn test_display_escapes_like_debug() {
    let call = Call::new("echo").arg("a\nb".to_string());
    assert_eq!(call.to_string(), r#"echo("a\nb")"#);
}

#[rstest]
#[case(Call::new("f").arg("x").arg(1).kwarg("name", String::from("y")), vec!["x", "y"])]
#[case(Call::new("f").arg(1.5).arg('c'), vec![])]
#[case(Call::new("f").arg(vec!["not", "text"]), vec![])]
fn test_text_args(#[case] call: Call, #[case] expected: Vec<&str>) {
    assert_eq!(call.text_args().collect::<Vec<_>>(), expected);
}

#[test]
fn test_path() {
    assert_eq!(Call::new("calc::area").path(), "calc::area");
}
