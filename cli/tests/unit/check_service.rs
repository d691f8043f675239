//! Tests for the registry check use-case.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use mcpdoc_cli::application::services::registry_check::{classify_all, load_registry, run_check};
use mcpdoc_cli::domain::RegistryError;
use mcpdoc_cli::infra::command_runner::TokioCommandRunner;
use mcpdoc_common::HealthState;

use crate::mocks::{
    FixedClock, MemoryRegistry, MemoryReportWriter, MockProbe, StaticProbe, UnreadableRegistry,
};

const REGISTRY: &str = r#"{
  "mcpServers": {
    "alpha": {"command": "npx", "args": ["-y", "@mcp/alpha"], "env": {"TOKEN": "your_token_here"}},
    "beta": {"command": "node", "args": ["C:\\srv\\beta.js"]},
    "memory": {"command": "node", "args": ["/opt/memory/index.js"]},
    "custom": {"command": "docker", "args": ["run", "img"]}
  }
}"#;

fn no_launchers() -> Option<&'static TokioCommandRunner> {
    None
}

#[tokio::test]
async fn test_run_check_aggregates_and_persists() {
    let store = MemoryRegistry::new(REGISTRY);
    let writer = MemoryReportWriter::default();
    let probe = StaticProbe::with(&["/opt/memory/index.js"]);

    let outcome = run_check(&store, &probe, &writer, no_launchers(), &FixedClock::new())
        .await
        .unwrap();

    let report = &outcome.report;
    assert_eq!(report.total, 4);
    assert_eq!(report.count(HealthState::Ready), 1);
    assert_eq!(report.count(HealthState::NeedsConfiguration), 1);
    assert_eq!(report.count(HealthState::Missing), 1);
    assert_eq!(report.count(HealthState::Unknown), 1);
    assert_eq!(
        report.issues,
        [
            "alpha: missing value for TOKEN",
            "beta: file not found: C:\\srv\\beta.js",
        ]
    );
    assert_eq!(report.recommendations, ["alpha: set TOKEN", "beta: recreate entry"]);
    assert_eq!(report.timestamp, FixedClock::new().0);
    assert!(report.launchers.is_empty());

    let persisted = writer.persisted.borrow();
    assert_eq!(persisted.len(), 1);
    assert_eq!(&persisted[0], report);
}

#[tokio::test]
async fn test_run_check_marks_advanced_ready_entries() {
    let store = MemoryRegistry::new(REGISTRY);
    let writer = MemoryReportWriter::default();
    let probe = StaticProbe::with(&["/opt/memory/index.js"]);

    let outcome = run_check(&store, &probe, &writer, no_launchers(), &FixedClock::new())
        .await
        .unwrap();

    let memory = outcome
        .verdicts
        .iter()
        .find(|v| v.name == "memory")
        .unwrap();
    assert_eq!(memory.verdict.state, HealthState::Ready);
    assert!(memory.verdict.is_advanced);
}

#[tokio::test]
async fn test_run_check_unreadable_registry_is_fatal() {
    let writer = MemoryReportWriter::default();
    let err = run_check(
        &UnreadableRegistry,
        &StaticProbe::default(),
        &writer,
        no_launchers(),
        &FixedClock::new(),
    )
    .await
    .unwrap_err();

    assert!(err.downcast_ref::<RegistryError>().is_some());
    assert!(writer.persisted.borrow().is_empty());
}

#[tokio::test]
async fn test_run_check_invalid_json_is_fatal() {
    let store = MemoryRegistry::new("{ not json");
    let writer = MemoryReportWriter::default();
    let err = run_check(
        &store,
        &StaticProbe::default(),
        &writer,
        no_launchers(),
        &FixedClock::new(),
    )
    .await
    .unwrap_err();

    assert!(format!("{err:#}").contains("not valid JSON"), "got: {err:#}");
    assert!(writer.persisted.borrow().is_empty());
}

#[test]
fn test_load_registry_without_servers_is_empty() {
    let store = MemoryRegistry::new(r#"{"theme": "dark"}"#);
    let registry = load_registry(&store).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn test_classify_all_probes_normalized_path() {
    let mut probe = MockProbe::new();
    probe
        .expect_exists()
        .withf(|p: &str| p == "/mnt/c/srv/beta.js")
        .times(1)
        .returning(|_| Ok(true));

    let store = MemoryRegistry::new(
        r#"{"mcpServers": {"beta": {"command": "node", "args": ["C:\\srv\\beta.js"]}}}"#,
    );
    let registry = load_registry(&store).unwrap();
    let verdicts = classify_all(&registry, &probe);

    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].verdict.state, HealthState::Ready);
}

#[test]
fn test_classify_all_never_probes_package_entries() {
    let mut probe = MockProbe::new();
    probe.expect_exists().never();

    let store = MemoryRegistry::new(
        r#"{"mcpServers": {"gh": {"command": "npx", "args": ["@mcp/github"]}}}"#,
    );
    let registry = load_registry(&store).unwrap();
    let verdicts = classify_all(&registry, &probe);
    assert_eq!(verdicts[0].verdict.state, HealthState::Ready);
}

#[test]
fn test_classify_all_probe_failure_is_missing_with_access_issue() {
    let store = MemoryRegistry::new(
        r#"{"mcpServers": {"beta": {"command": "node", "args": ["/srv/beta.js"]}}}"#,
    );
    let registry = load_registry(&store).unwrap();
    let probe = StaticProbe::default().deny("/srv/beta.js");
    let verdicts = classify_all(&registry, &probe);

    let verdict = &verdicts[0].verdict;
    assert_eq!(verdict.state, HealthState::Missing);
    assert!(verdict.issues[0].starts_with("cannot access: /srv/beta.js"));
    assert_eq!(verdict.recommendations, ["check permissions for /srv/beta.js"]);
}
