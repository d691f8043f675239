//! Application service: registry cleanup use-case.
//!
//! Removes script entries whose file is gone. The document is only rewritten
//! after a verified backup of the exact bytes that were read.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::application::ports::{Clock, PathProbe, ProgressReporter, RegistryStore};
use crate::domain::error::ReconcileError;
use crate::domain::hex_encode;
use crate::domain::reconcile::{Reconciliation, reconcile};
use crate::domain::registry::Registry;

/// A computed, not yet applied, cleanup.
#[derive(Debug)]
pub struct CleanPlan {
    /// Document bytes the plan was computed from.
    original: Vec<u8>,
    /// Number of entries before cleanup.
    pub total: usize,
    pub reconciliation: Reconciliation,
}

impl CleanPlan {
    #[must_use]
    pub fn removed(&self) -> &[String] {
        &self.reconciliation.removed
    }

    #[must_use]
    pub fn unverified(&self) -> &[String] {
        &self.reconciliation.unverified
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.reconciliation.is_noop()
    }
}

/// Backup written before the registry was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub path: PathBuf,
    /// SHA-256 of the backup, equal to the pre-cleanup document.
    pub sha256: String,
}

/// Result of applying a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub kept: usize,
    pub removed: Vec<String>,
    /// `None` when nothing had to change.
    pub backup: Option<BackupRecord>,
}

/// Read the registry and compute which entries would be removed.
///
/// # Errors
///
/// Returns an error if the document cannot be read or parsed.
pub fn plan_clean(store: &impl RegistryStore, probe: &impl PathProbe) -> Result<CleanPlan> {
    let original = store.read()?;
    let registry = Registry::parse(&original)
        .with_context(|| format!("cannot use registry {}", store.location().display()))?;
    let reconciliation = reconcile(&registry, probe);
    for name in &reconciliation.unverified {
        tracing::warn!(entry = %name, "script path could not be probed; keeping entry");
    }
    tracing::debug!(
        total = registry.len(),
        removed = reconciliation.removed.len(),
        "cleanup planned"
    );
    Ok(CleanPlan {
        original,
        total: registry.len(),
        reconciliation,
    })
}

/// Apply a plan: back up, verify the backup, then write the reduced document.
///
/// A no-op plan performs no I/O.
///
/// # Errors
///
/// Returns an error if the document changed since the plan was made, the
/// backup cannot be written or verified, or the final write fails. In every
/// case except the final write the registry document is untouched.
pub fn apply_clean(
    store: &impl RegistryStore,
    reporter: &impl ProgressReporter,
    clock: &impl Clock,
    plan: CleanPlan,
) -> Result<CleanOutcome> {
    let kept = plan.reconciliation.kept.len();
    if !plan.unverified().is_empty() {
        reporter.warn(&format!(
            "Kept unchecked: {}",
            plan.unverified().join(", ")
        ));
    }
    if plan.is_noop() {
        reporter.success("Registry already clean");
        return Ok(CleanOutcome {
            kept,
            removed: Vec::new(),
            backup: None,
        });
    }

    let current = store.read()?;
    if current != plan.original {
        anyhow::bail!(
            "{} changed since it was read. Run the cleanup again.",
            store.location().display()
        );
    }

    reporter.step("Backing up registry...");
    let backup = backup_verified(store, clock, &plan.original)?;
    reporter.success(&format!("Backup written to {}", backup.path.display()));

    reporter.step("Writing cleaned registry...");
    let contents = plan
        .reconciliation
        .kept
        .to_json_bytes()
        .context("cannot serialize cleaned registry")?;
    store.write(&contents)?;
    tracing::info!(
        registry = %store.location().display(),
        removed = plan.reconciliation.removed.len(),
        kept,
        "registry rewritten"
    );
    reporter.success(&format!(
        "Removed {} entr{}",
        plan.reconciliation.removed.len(),
        if plan.reconciliation.removed.len() == 1 { "y" } else { "ies" }
    ));

    Ok(CleanOutcome {
        kept,
        removed: plan.reconciliation.removed,
        backup: Some(backup),
    })
}

fn backup_verified(
    store: &impl RegistryStore,
    clock: &impl Clock,
    original: &[u8],
) -> Result<BackupRecord> {
    let path = store
        .backup(original, clock.now())
        .map_err(|e| ReconcileError::BackupFailed {
            path: store.location().to_path_buf(),
            reason: format!("{e:#}"),
        })?;

    let expected = sha256_hex(original);
    let written = store
        .read_backup(&path)
        .map_err(|e| ReconcileError::BackupFailed {
            path: path.clone(),
            reason: format!("{e:#}"),
        })?;
    let actual = sha256_hex(&written);
    if actual != expected {
        return Err(ReconcileError::BackupMismatch {
            path,
            expected,
            actual,
        }
        .into());
    }
    tracing::info!(backup = %path.display(), sha256 = %expected, "backup verified");
    Ok(BackupRecord {
        path,
        sha256: expected,
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex_encode(&Sha256::digest(bytes))
}
