//! Integration tests for directory conversion

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn keycase() -> Command {
    Command::cargo_bin("keycase").unwrap()
}

#[test]
fn test_recursive_directory_conversion() {
    let input_dir = tempdir().unwrap();
    fs::create_dir_all(input_dir.path().join("orgs")).unwrap();
    fs::write(input_dir.path().join("devices.json"), r#"{"device_list": []}"#).unwrap();
    fs::write(
        input_dir.path().join("orgs/members.json"),
        r#"[{"user_id": 1, "org_role": "admin"}]"#,
    )
    .unwrap();
    fs::write(input_dir.path().join("readme.txt"), "not json").unwrap();

    let output_dir = tempdir().unwrap();

    keycase()
        .arg(input_dir.path().to_str().unwrap())
        .args(["--recursive", "--plain", "-o", output_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Found 2 JSON files"));

    assert_eq!(
        fs::read_to_string(output_dir.path().join("devices.json")).unwrap(),
        r#"{"deviceList":[]}"#
    );
    assert_eq!(
        fs::read_to_string(output_dir.path().join("orgs/members.json")).unwrap(),
        r#"[{"userId":1,"orgRole":"admin"}]"#
    );
    assert!(!output_dir.path().join("readme.json").exists());
}

#[test]
fn test_non_recursive_skips_subdirectories() {
    let input_dir = tempdir().unwrap();
    fs::create_dir_all(input_dir.path().join("nested")).unwrap();
    fs::write(input_dir.path().join("top.json"), r#"{"a_b": 1}"#).unwrap();
    fs::write(input_dir.path().join("nested/deep.json"), r#"{"c_d": 1}"#).unwrap();

    let output_dir = tempdir().unwrap();

    keycase()
        .arg(input_dir.path().to_str().unwrap())
        .args(["--plain", "-o", output_dir.path().to_str().unwrap()])
        .assert()
        .success();

    assert!(output_dir.path().join("top.json").exists());
    assert!(!output_dir.path().join("nested/deep.json").exists());
}

#[test]
fn test_error_aborts_without_continue() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.json"), "{broken").unwrap();
    fs::write(input_dir.path().join("b.json"), r#"{"x_y": 1}"#).unwrap();
    let output_dir = tempdir().unwrap();

    keycase()
        .arg(input_dir.path().to_str().unwrap())
        .args(["-o", output_dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error converting a.json"));

    // files are processed in sorted order, so b.json was never reached
    assert!(!output_dir.path().join("b.json").exists());
}

#[test]
fn test_continue_on_error() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.json"), "{broken").unwrap();
    fs::write(input_dir.path().join("b.json"), r#"{"x_y": 1}"#).unwrap();
    let output_dir = tempdir().unwrap();

    keycase()
        .arg(input_dir.path().to_str().unwrap())
        .args(["--plain", "--continue-on-error", "-o", output_dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 2 files failed"));

    assert_eq!(
        fs::read_to_string(output_dir.path().join("b.json")).unwrap(),
        r#"{"xY":1}"#
    );
}

#[test]
fn test_validate_only_directory() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("good.json"), "{}").unwrap();
    fs::write(input_dir.path().join("bad.json"), "[1,").unwrap();

    keycase()
        .arg(input_dir.path().to_str().unwrap())
        .arg("--validate-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("✓ good.json"))
        .stderr(predicate::str::contains("✗ bad.json"));
}
