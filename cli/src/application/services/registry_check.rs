//! Application service: registry health check use-case.
//!
//! read → parse → classify every entry → probe launchers → aggregate → persist.
//! All I/O is routed through injected port traits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use mcpdoc_common::Report;

use crate::application::ports::{Clock, CommandRunner, PathProbe, RegistryStore, ReportWriter};
use crate::application::services::launchers::probe_launchers;
use crate::domain::classify::classify;
use crate::domain::registry::Registry;
use crate::domain::report::{EntryVerdict, aggregate};

/// Everything a caller needs to render a check run.
#[derive(Debug)]
pub struct CheckOutcome {
    /// The registry snapshot that was classified.
    pub registry: Registry,
    /// Per-entry verdicts, registry order.
    pub verdicts: Vec<EntryVerdict>,
    /// The persisted report.
    pub report: Report,
    /// Where the report was written.
    pub report_path: PathBuf,
}

/// Load the registry snapshot. A missing or malformed document is fatal.
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed.
pub fn load_registry(store: &impl RegistryStore) -> Result<Registry> {
    let bytes = store.read()?;
    Registry::parse(&bytes)
        .with_context(|| format!("cannot use registry {}", store.location().display()))
}

/// Classify every entry in registry order.
#[must_use]
pub fn classify_all(registry: &Registry, probe: &impl PathProbe) -> Vec<EntryVerdict> {
    registry
        .entries()
        .iter()
        .map(|entry| {
            let verdict = classify(entry, probe);
            tracing::debug!(entry = %entry.name, state = %verdict.state, "classified");
            EntryVerdict {
                name: entry.name.clone(),
                verdict,
            }
        })
        .collect()
}

/// Run the check workflow.
///
/// Launchers are probed only when `launcher_runner` is given.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or the report cannot be
/// persisted. Individual entries never fail the run.
pub async fn run_check(
    store: &impl RegistryStore,
    probe: &impl PathProbe,
    writer: &impl ReportWriter,
    launcher_runner: Option<&impl CommandRunner>,
    clock: &impl Clock,
) -> Result<CheckOutcome> {
    let registry = load_registry(store)?;
    tracing::info!(
        registry = %store.location().display(),
        entries = registry.len(),
        "checking registry"
    );

    let verdicts = classify_all(&registry, probe);

    let launchers = match launcher_runner {
        Some(runner) => probe_launchers(runner, &registry).await,
        None => Vec::new(),
    };

    let report = Report {
        launchers,
        ..aggregate(&verdicts, clock.now())
    };
    let report_path = writer.persist(&report).context("cannot persist health report")?;
    tracing::info!(path = %report_path.display(), "report written");

    Ok(CheckOutcome {
        registry,
        verdicts,
        report,
        report_path,
    })
}
