//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared report types -
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use mcpdoc_common::Report;

use crate::domain::config::DoctorConfig;

pub use crate::domain::classify::PathProbe;

// ── Registry Port ─────────────────────────────────────────────────────────────

/// Access to the on-disk registry document and its backups.
pub trait RegistryStore {
    /// Location of the registry document.
    fn location(&self) -> &Path;
    /// Read the raw document bytes.
    fn read(&self) -> Result<Vec<u8>>;
    /// Write `original` to a new backup file and return its path.
    ///
    /// Must never overwrite an existing backup.
    fn backup(&self, original: &[u8], taken_at: DateTime<Utc>) -> Result<PathBuf>;
    /// Read a backup back for verification.
    fn read_backup(&self, backup: &Path) -> Result<Vec<u8>>;
    /// Replace the document with `contents`.
    fn write(&self, contents: &[u8]) -> Result<()>;
}

// ── Report Port ───────────────────────────────────────────────────────────────

/// Persists the latest health report, replacing any previous one.
pub trait ReportWriter {
    /// Write the report and return where it went.
    fn persist(&self, report: &Report) -> Result<PathBuf>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts settings persistence.
pub trait ConfigStore {
    /// Load settings, returning defaults when no file exists.
    fn load(&self) -> Result<DoctorConfig>;
    /// Persist settings.
    fn save(&self, config: &DoctorConfig) -> Result<()>;
    /// Path of the settings file.
    fn path(&self) -> Result<PathBuf>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so launcher probes can be mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// Source of report and backup timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}
