//! Integration tests for `mcpdoc config`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;

use crate::support::Sandbox;

#[test]
fn test_config_show_defaults() {
    Sandbox::new()
        .mcpdoc()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("registry.path:"))
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn test_config_set_persists_yaml() {
    let sandbox = Sandbox::new();
    sandbox
        .mcpdoc()
        .args(["config", "set", "report.path", "/tmp/mcpdoc-report.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set report.path"));

    let yaml = std::fs::read_to_string(sandbox.config()).unwrap();
    assert!(yaml.contains("/tmp/mcpdoc-report.json"), "got: {yaml}");

    let output = sandbox
        .mcpdoc()
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["config"]["report"]["path"], "/tmp/mcpdoc-report.json");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .mcpdoc()
        .args(["config", "set", "report.colour", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!sandbox.config().exists());
}

#[test]
fn test_config_set_unknown_key_json_code() {
    let output = Sandbox::new()
        .mcpdoc()
        .args(["config", "set", "report.colour", "x", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["code"], "invalid_config");
}
