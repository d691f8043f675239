//! Integration tests for the CLI surface: help, version and global flags.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use predicates::prelude::*;

use crate::support::Sandbox;

#[test]
fn test_cli_no_args_shows_help() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    Sandbox::new().mcpdoc().assert().code(2).stderr(predicate::str::contains(
        "Health checks and cleanup for MCP server registries",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    Sandbox::new()
        .mcpdoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_version_command_shows_version() {
    Sandbox::new()
        .mcpdoc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "mcpdoc {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = Sandbox::new()
        .mcpdoc()
        .args(["version", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_command_fails() {
    Sandbox::new()
        .mcpdoc()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_list_groups_by_category() {
    let sandbox = Sandbox::with_registry(
        r#"{"mcpServers": {
            "github": {"command": "npx", "args": ["@mcp/github"]},
            "custom": {"command": "node", "args": ["/srv/custom.js"]}
        }}"#,
    );
    sandbox
        .mcpdoc()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Development:"))
        .stdout(predicate::str::contains("Other:"))
        .stdout(predicate::str::contains("/srv/custom.js"));
}

#[test]
fn test_list_json_reports_kind() {
    let sandbox = Sandbox::with_registry(
        r#"{"mcpServers": {"jup": {"command": "python3", "args": ["/opt/jup.py"]}}}"#,
    );
    let output = sandbox.mcpdoc().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["total"], 1);
    assert_eq!(v["servers"][0]["kind"], "interpreter");
    assert_eq!(v["servers"][0]["path"], "/opt/jup.py");
}
