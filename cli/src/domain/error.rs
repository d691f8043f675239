//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Registry errors ───────────────────────────────────────────────────────────

/// The configuration document could not be used. Fatal before classification.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Cannot read registry {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Registry is malformed: {0}")]
    Malformed(String),
}

// ── Reconcile errors ──────────────────────────────────────────────────────────

/// Failures on the mutation path. The registry document is untouched when any
/// of these is returned.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Backup of {} failed: {reason}. Registry left unchanged.", .path.display())]
    BackupFailed { path: PathBuf, reason: String },

    #[error(
        "Backup {} does not match the registry (expected sha256 {expected}, got {actual}). Registry left unchanged.",
        .path.display()
    )]
    BackupMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to settings key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value:?}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
