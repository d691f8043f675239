//! Per-entry health classification.
//!
//! Pure given its [`PathProbe`]: the verdict depends only on the entry and on
//! what the probe answers, so repeated runs over the same state agree.

use mcpdoc_common::HealthState;
use serde::Serialize;

use crate::domain::path::normalize;
use crate::domain::registry::{EntryDescriptor, Launch};

// ── Constants ────────────────────────────────────────────────────────────────

/// Servers flagged as "advanced" in reports. Display only.
pub const ADVANCED_SERVERS: &[&str] = &[
    "a2a-coder",
    "deepseek",
    "gpt4",
    "jupyter-notebook-mcp",
    "memory",
    "sequential-thinking",
];

/// Sentinel fragments that mark an environment value as not yet filled in.
pub const PLACEHOLDER_MARKERS: &[&str] = &["your_", "_here"];

// ── Probe seam ───────────────────────────────────────────────────────────────

/// Filesystem existence oracle.
///
/// `Err` means the probe itself failed (e.g. permission denied), which is
/// reported separately from a path that is simply absent.
pub trait PathProbe {
    /// Whether `path` (already in local form) exists.
    fn exists(&self, path: &str) -> std::io::Result<bool>;
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    fn exists(&self, path: &str) -> std::io::Result<bool> {
        (**self).exists(path)
    }
}

// ── Verdict ──────────────────────────────────────────────────────────────────

/// Classifier output for one entry. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthVerdict {
    pub state: HealthState,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    /// Entry is on the advanced allow-list and ready.
    pub is_advanced: bool,
}

impl HealthVerdict {
    fn new(state: HealthState) -> Self {
        Self {
            state,
            issues: Vec::new(),
            recommendations: Vec::new(),
            is_advanced: false,
        }
    }
}

// ── Classification ───────────────────────────────────────────────────────────

/// Classify one entry.
#[must_use]
pub fn classify(entry: &EntryDescriptor, probe: &impl PathProbe) -> HealthVerdict {
    match &entry.launch {
        Launch::Package { environment, .. } => classify_package(environment),
        Launch::LocalScript { launch_path, .. } | Launch::InterpreterScript { launch_path, .. } => {
            classify_script(&entry.name, launch_path, probe)
        }
        Launch::Unrecognized { .. } => HealthVerdict::new(HealthState::Unknown),
        Launch::Malformed { reason } => {
            let mut verdict = HealthVerdict::new(HealthState::Unknown);
            verdict.issues.push(format!("malformed entry: {reason}"));
            verdict
        }
    }
}

/// Whether an environment value is an unfilled template value.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    PLACEHOLDER_MARKERS.iter().any(|m| lower.contains(m))
}

fn classify_package(environment: &[(String, String)]) -> HealthVerdict {
    let mut verdict = HealthVerdict::new(HealthState::Ready);
    for (var, value) in environment {
        if is_placeholder(value) {
            verdict.issues.push(format!("missing value for {var}"));
            verdict.recommendations.push(format!("set {var}"));
            verdict.state = HealthState::NeedsConfiguration;
        }
    }
    verdict
}

fn classify_script(name: &str, native: &str, probe: &impl PathProbe) -> HealthVerdict {
    match probe.exists(&normalize(native)) {
        Ok(true) => {
            let mut verdict = HealthVerdict::new(HealthState::Ready);
            verdict.is_advanced = ADVANCED_SERVERS.contains(&name);
            verdict
        }
        Ok(false) => {
            let mut verdict = HealthVerdict::new(HealthState::Missing);
            verdict.issues.push(format!("file not found: {native}"));
            verdict.recommendations.push("recreate entry".to_string());
            verdict
        }
        Err(e) => {
            let mut verdict = HealthVerdict::new(HealthState::Missing);
            verdict.issues.push(format!("cannot access: {native} ({e})"));
            verdict
                .recommendations
                .push(format!("check permissions for {native}"));
            verdict
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
