//! Integration tests for the `keycase` binary
//!
//! Exercises stdin, literal JSON, file input and output, and error exits
//! through the actual binary.

// `Command::cargo_bin` is deprecated in newer assert_cmd releases
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn keycase() -> Command {
    Command::cargo_bin("keycase").unwrap()
}

#[test]
fn stdin_to_camel() {
    keycase()
        .args(["--stdin", "--plain"])
        .write_stdin(r#"{"device_id": 1, "os_info": {"kernel_version": "6.1"}}"#)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "{\"deviceId\":1,\"osInfo\":{\"kernelVersion\":\"6.1\"}}\n",
        ));
}

#[test]
fn literal_json_to_snake() {
    keycase()
        .args([r#"[{"userName": "ann"}]"#, "--to", "snake", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"[{"user_name":"ann"}]"#));
}

#[test]
fn pretty_output_by_default() {
    keycase()
        .arg(r#"{"a_b": 1}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"aB\": 1\n"));
}

#[test]
fn file_to_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out/converted.json");
    fs::write(&input, r#"{"member_since": "2020"}"#).unwrap();

    keycase()
        .arg(input.to_str().unwrap())
        .args(["--plain", "-o", output.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Converted to:"));

    assert_eq!(fs::read_to_string(output).unwrap(), r#"{"memberSince":"2020"}"#);
}

#[test]
fn stats_are_reported() {
    keycase()
        .args([r#"{"a_b": {"c_d": 1}}"#, "--stats"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Keys renamed: 2/2"));
}

#[test]
fn invalid_json_fails() {
    keycase()
        .arg("{\"broken\": }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON parse error at line 1"));
}

#[test]
fn validate_only_does_not_convert() {
    keycase()
        .args([r#"{"a_b": 1}"#, "--validate-only"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Valid JSON"));
}

#[test]
fn depth_limit_fails() {
    keycase()
        .args([r#"{"a": {"b": {"c": {}}}}"#, "--max-depth", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deeper than 2 levels"));
}

#[test]
fn missing_input_fails() {
    keycase()
        .arg("does/not/exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input path does not exist"));
}

#[test]
fn unknown_convention_rejected() {
    keycase()
        .args([r#"{}"#, "--to", "kebab"])
        .assert()
        .failure();
}
