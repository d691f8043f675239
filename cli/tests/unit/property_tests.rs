//! Property-based tests for normalization, classification, aggregation and
//! reconciliation invariants.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use chrono::Utc;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

use mcpdoc_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key, validate_config_value};
use mcpdoc_cli::domain::registry::Registry;
use mcpdoc_cli::domain::report::EntryVerdict;
use mcpdoc_cli::domain::{aggregate, classify, normalize, reconcile};
use mcpdoc_common::HealthState;

use crate::mocks::StaticProbe;

/// One generated server record plus whether its script exists.
#[derive(Debug, Clone)]
enum Record {
    Package { placeholder: bool },
    Script { present: bool },
    Other,
}

fn record() -> impl Strategy<Value = Record> {
    prop_oneof![
        any::<bool>().prop_map(|placeholder| Record::Package { placeholder }),
        any::<bool>().prop_map(|present| Record::Script { present }),
        Just(Record::Other),
    ]
}

/// Build a registry and the probe that matches it.
fn build(records: &[Record]) -> (Registry, StaticProbe) {
    let mut servers = Map::new();
    let mut present = Vec::new();
    for (i, r) in records.iter().enumerate() {
        let name = format!("server-{i}");
        let value = match r {
            Record::Package { placeholder } => {
                let token = if *placeholder { "your_token_here" } else { "abc" };
                json!({"command": "npx", "args": ["@mcp/x"], "env": {"TOKEN": token}})
            }
            Record::Script { present: p } => {
                let path = format!("/srv/{name}.js");
                if *p {
                    present.push(path.clone());
                }
                json!({"command": "node", "args": [path]})
            }
            Record::Other => json!({"command": "docker", "args": ["run"]}),
        };
        servers.insert(name, value);
    }
    let registry = Registry::from_document(json!({"mcpServers": Value::Object(servers)})).unwrap();
    let refs: Vec<&str> = present.iter().map(String::as_str).collect();
    (registry, StaticProbe::with(&refs))
}

proptest! {
    /// Normalizing an already-normalized path changes nothing.
    #[test]
    fn prop_normalize_is_idempotent(path in r"([A-Za-z]:)?[\\/A-Za-z0-9_. -]{0,40}") {
        let once = normalize(&path);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(!once.contains('\\'));
    }

    /// Every drive letter maps under the mount root in lowercase.
    #[test]
    fn prop_normalize_maps_drive_letters(drive in "[A-Za-z]", rest in "[a-z0-9]{1,12}") {
        let out = normalize(&format!("{drive}:\\{rest}"));
        prop_assert_eq!(out, format!("/mnt/{}/{rest}", drive.to_ascii_lowercase()));
    }

    /// Same entry and same filesystem view give the same verdict.
    #[test]
    fn prop_classify_is_deterministic(records in prop::collection::vec(record(), 0..12)) {
        let (registry, probe) = build(&records);
        for entry in registry.entries() {
            prop_assert_eq!(classify(entry, &probe), classify(entry, &probe));
        }
    }

    /// Summary counts cover every state and add up to the entry count.
    #[test]
    fn prop_aggregate_is_complete(records in prop::collection::vec(record(), 0..12)) {
        let (registry, probe) = build(&records);
        let verdicts: Vec<EntryVerdict> = registry
            .entries()
            .iter()
            .map(|e| EntryVerdict { name: e.name.clone(), verdict: classify(e, &probe) })
            .collect();
        let report = aggregate(&verdicts, Utc::now());

        prop_assert_eq!(report.summary.len(), HealthState::ALL.len());
        prop_assert_eq!(report.summary.values().sum::<usize>(), records.len());
        prop_assert_eq!(report.total, records.len());
    }

    /// Kept plus removed is exactly the original set; only absent scripts go.
    #[test]
    fn prop_reconcile_conserves_entries(records in prop::collection::vec(record(), 0..12)) {
        let (registry, probe) = build(&records);
        let result = reconcile(&registry, &probe);

        let kept: HashSet<&str> = result.kept.names().collect();
        let removed: HashSet<&str> = result.removed.iter().map(String::as_str).collect();
        let all: HashSet<&str> = registry.names().collect();
        prop_assert!(kept.is_disjoint(&removed));
        prop_assert_eq!(kept.union(&removed).copied().collect::<HashSet<_>>(), all);

        let expected_removed = records
            .iter()
            .filter(|r| matches!(r, Record::Script { present: false }))
            .count();
        prop_assert_eq!(result.removed.len(), expected_removed);
    }

    /// Reconciling an already reconciled registry removes nothing more.
    #[test]
    fn prop_reconcile_is_idempotent(records in prop::collection::vec(record(), 0..12)) {
        let (registry, probe) = build(&records);
        let once = reconcile(&registry, &probe);
        let twice = reconcile(&once.kept, &probe);
        prop_assert!(twice.is_noop());
        prop_assert_eq!(twice.kept, once.kept);
    }

    /// Keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,20}\\.[a-z]{1,20}") {
        prop_assume!(!VALID_CONFIG_KEYS.contains(&key.as_str()));
        prop_assert!(validate_config_key(&key).is_err());
    }

    /// Non-blank values without NUL are accepted for every key.
    #[test]
    fn prop_plain_paths_accepted(value in "/[a-z0-9_/.-]{1,40}") {
        for key in VALID_CONFIG_KEYS {
            prop_assert!(validate_config_value(key, &value).is_ok());
        }
    }
}
