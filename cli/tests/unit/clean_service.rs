//! Tests for the registry cleanup use-case.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use mcpdoc_cli::application::services::registry_clean::{apply_clean, plan_clean};
use mcpdoc_cli::domain::ReconcileError;
use mcpdoc_cli::domain::registry::Registry;
use sha2::{Digest, Sha256};

use crate::mocks::{FixedClock, MemoryRegistry, RecordingReporter, StaticProbe};

const REGISTRY: &str = r#"{
  "theme": "dark",
  "mcpServers": {
    "a": {"command": "node", "args": ["/srv/a.js"]},
    "b": {"command": "node", "args": ["/srv/b.js"]},
    "c": {"command": "npx", "args": ["@mcp/c"], "env": {"KEY": "your_key_here"}}
  }
}"#;

#[test]
fn test_clean_removes_only_confirmed_missing_scripts() {
    let store = MemoryRegistry::new(REGISTRY);
    let reporter = RecordingReporter::default();
    let plan = plan_clean(&store, &StaticProbe::with(&["/srv/a.js"])).unwrap();
    assert_eq!(plan.total, 3);
    assert_eq!(plan.removed(), ["b"]);

    let outcome = apply_clean(&store, &reporter, &FixedClock::new(), plan).unwrap();

    assert_eq!(outcome.kept, 2);
    assert_eq!(outcome.removed, ["b"]);
    let rewritten = Registry::parse(store.document_str().as_bytes()).unwrap();
    assert_eq!(rewritten.names().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(rewritten.document()["theme"], "dark");
}

#[test]
fn test_clean_backup_is_byte_identical_to_original() {
    let store = MemoryRegistry::new(REGISTRY);
    let plan = plan_clean(&store, &StaticProbe::with(&["/srv/a.js"])).unwrap();
    let outcome = apply_clean(
        &store,
        &RecordingReporter::default(),
        &FixedClock::new(),
        plan,
    )
    .unwrap();

    let backups = store.backups.borrow();
    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].1, REGISTRY.as_bytes());

    let backup = outcome.backup.unwrap();
    assert_eq!(backup.path, backups[0].0);
    let expected: String = Sha256::digest(REGISTRY.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    assert_eq!(backup.sha256, expected);
}

#[test]
fn test_clean_backup_failure_leaves_document_untouched() {
    let mut store = MemoryRegistry::new(REGISTRY);
    store.fail_backup = true;
    let plan = plan_clean(&store, &StaticProbe::default()).unwrap();

    let err = apply_clean(
        &store,
        &RecordingReporter::default(),
        &FixedClock::new(),
        plan,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReconcileError>(),
        Some(ReconcileError::BackupFailed { .. })
    ));
    assert!(err.to_string().contains("Registry left unchanged"));
    assert_eq!(*store.writes.borrow(), 0);
    assert_eq!(store.document_str(), REGISTRY);
}

#[test]
fn test_clean_backup_mismatch_leaves_document_untouched() {
    let mut store = MemoryRegistry::new(REGISTRY);
    store.corrupt_backup = Some(b"{}".to_vec());
    let plan = plan_clean(&store, &StaticProbe::default()).unwrap();

    let err = apply_clean(
        &store,
        &RecordingReporter::default(),
        &FixedClock::new(),
        plan,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReconcileError>(),
        Some(ReconcileError::BackupMismatch { .. })
    ));
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn test_clean_noop_skips_backup_and_write() {
    let store = MemoryRegistry::new(REGISTRY);
    let probe = StaticProbe::with(&["/srv/a.js", "/srv/b.js"]);
    let plan = plan_clean(&store, &probe).unwrap();
    assert!(plan.is_noop());

    let outcome = apply_clean(
        &store,
        &RecordingReporter::default(),
        &FixedClock::new(),
        plan,
    )
    .unwrap();

    assert_eq!(outcome.kept, 3);
    assert!(outcome.removed.is_empty());
    assert!(outcome.backup.is_none());
    assert!(store.backups.borrow().is_empty());
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn test_clean_keeps_entries_whose_probe_fails() {
    let store = MemoryRegistry::new(REGISTRY);
    let probe = StaticProbe::with(&["/srv/a.js"]).deny("/srv/b.js");
    let plan = plan_clean(&store, &probe).unwrap();

    assert!(plan.is_noop());
    assert_eq!(plan.unverified(), ["b"]);
}

#[test]
fn test_clean_warns_about_unchecked_entries() {
    let store = MemoryRegistry::new(REGISTRY);
    let reporter = RecordingReporter::default();
    let probe = StaticProbe::with(&["/srv/a.js"]).deny("/srv/b.js");
    let plan = plan_clean(&store, &probe).unwrap();

    let outcome = apply_clean(&store, &reporter, &FixedClock::new(), plan).unwrap();

    assert!(outcome.backup.is_none());
    let messages = reporter.messages.borrow();
    assert!(messages.iter().any(|m| m == "warn: Kept unchecked: b"), "{messages:?}");
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn test_clean_refuses_when_document_changed_after_planning() {
    let store = MemoryRegistry::new(REGISTRY);
    let plan = plan_clean(&store, &StaticProbe::default()).unwrap();
    *store.document.borrow_mut() = b"{\"mcpServers\": {}}".to_vec();

    let err = apply_clean(
        &store,
        &RecordingReporter::default(),
        &FixedClock::new(),
        plan,
    )
    .unwrap_err();

    assert!(err.to_string().contains("changed since it was read"));
    assert!(store.backups.borrow().is_empty());
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn test_clean_reports_progress() {
    let store = MemoryRegistry::new(REGISTRY);
    let reporter = RecordingReporter::default();
    let plan = plan_clean(&store, &StaticProbe::default()).unwrap();
    apply_clean(&store, &reporter, &FixedClock::new(), plan).unwrap();

    let messages = reporter.messages.borrow();
    assert!(messages.iter().any(|m| m == "ok: Removed 2 entries"), "{messages:?}");
}
