// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the `cfgexpand` binary.
//!
//! These tests run the actual CLI binary and verify its output.

#![cfg(feature = "cli")]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

/// Get the binary to test
fn cfgexpand_cmd() -> Command {
    let mut cmd = Command::cargo_bin("cfgexpand").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_flag() {
    cfgexpand_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expand environment variables"));
}

#[test]
fn test_reads_file_and_prints_json() {
    let file = common::create_temp_file(
        "host: ${CLI_HOST:localhost}\nport: ${CLI_PORT:8080}\n",
        ".yaml",
    );

    let output = cfgexpand_cmd()
        .arg(file.path())
        .env("CLI_HOST", "db.internal")
        .env_remove("CLI_PORT")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["host"], "db.internal");
    assert_eq!(json["port"], 8080);
}

#[test]
fn test_reads_stdin_when_no_file() {
    cfgexpand_cmd()
        .env_remove("CLI_NAME")
        .write_stdin("name: \"${CLI_NAME:-from-stdin}\"\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"from-stdin\""));
}

#[test]
fn test_reads_stdin_with_dash() {
    cfgexpand_cmd()
        .arg("-")
        .write_stdin("enabled: ${CLI_ENABLED:true}\n")
        .env_remove("CLI_ENABLED")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled\": true"));
}

#[test]
fn test_output_is_indented() {
    cfgexpand_cmd()
        .write_stdin("outer:\n  inner: value\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"outer\": {\n    \"inner\": \"value\"\n  }\n}"));
}

#[test]
fn test_yaml_output_format() {
    cfgexpand_cmd()
        .args(["--format", "yaml"])
        .env_remove("CLI_LEVEL")
        .write_stdin("level: ${CLI_LEVEL:3}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("level: 3"));
}

#[test]
fn test_empty_input_prints_usage() {
    cfgexpand_cmd()
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: cfgexpand"));
}

#[test]
fn test_missing_file_fails() {
    cfgexpand_cmd()
        .arg("/nonexistent/path/config.yaml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error reading input"));
}

#[test]
fn test_required_variable_fails() {
    cfgexpand_cmd()
        .env_remove("CLI_TOKEN")
        .write_stdin("token: ${CLI_TOKEN:?token is required}\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CLI_TOKEN"))
        .stderr(predicate::str::contains("token is required"));
}

#[test]
fn test_malformed_input_fails() {
    cfgexpand_cmd()
        .write_stdin("key: [unclosed\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error processing file"));
}

#[test]
fn test_strict_flag_reports_unresolved() {
    cfgexpand_cmd()
        .args(["--strict", "--budget", "2"])
        .env("CLI_GROW", "x${CLI_GROW}")
        .write_stdin("value: ${CLI_GROW}\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unresolved variable reference"));
}
