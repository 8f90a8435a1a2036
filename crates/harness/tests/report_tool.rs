// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration tests for the `helpfultests` report tool.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use helpfultests::{HarnessConfig, Runner, TestSuite};
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn write_results(path: &Path) {
    let config = HarnessConfig {
        results_file: Some(path.to_path_buf()),
        ..HarnessConfig::default()
    };
    let suite = TestSuite::new("Basics")
        .test("passes", |_| Ok(()))
        .test("fails", |case| case.assert_equal(&1, &2));
    Runner::new(config).run(vec![suite]);
}

mod render {
    use super::*;

    #[test]
    fn test_render_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.jsonl");
        write_results(&path);

        Command::cargo_bin("helpfultests")
            .unwrap()
            .args(["render", path.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::starts_with(
                "🙁 Your code did not pass all of the tests.",
            ))
            .stdout(predicate::str::contains("Succeeded: 1\n  Basics.passes"))
            .stdout(predicate::str::contains("  Basics.fails:\n"));
    }

    #[test]
    fn test_render_html() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.jsonl");
        write_results(&path);

        Command::cargo_bin("helpfultests")
            .unwrap()
            .args(["render", "--email", path.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("<pre>"))
            .stdout(predicate::str::contains("<br>"));
    }

    #[test]
    fn test_render_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        Command::cargo_bin("helpfultests")
            .unwrap()
            .args(["render", dir.path().join("nope.jsonl").to_str().unwrap()])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("could not open"));
    }
}

mod check_config {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = write_config("timeout_ms = 1500\n[comparison]\nwhitespace = \"strict\"\n");
        Command::cargo_bin("helpfultests")
            .unwrap()
            .args(["check-config", config.path().to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("ok (timeout 1500ms, strict whitespace)"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let config = write_config("time_out = 5\n");
        Command::cargo_bin("helpfultests")
            .unwrap()
            .args(["check-config", config.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("time_out"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = write_config("timeout_ms = 0\n");
        Command::cargo_bin("helpfultests")
            .unwrap()
            .args(["check-config", config.path().to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("timeout_ms must be greater than zero"));
    }
}
