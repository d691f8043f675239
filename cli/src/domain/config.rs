//! Domain types and validators for mcpdoc settings.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &["registry.path", "report.path", "backup.dir"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level settings stored in `~/.mcpdoc/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DoctorConfig {
    /// Registry document location.
    pub registry: RegistrySettings,
    /// Health report artifact location.
    pub report: ReportSettings,
    /// Backup placement.
    pub backup: BackupSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReportSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Backups go beside the registry unless `dir` is set.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BackupSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl DoctorConfig {
    /// Current value of a whitelisted key, `None` when unset or unknown.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PathBuf> {
        match key {
            "registry.path" => self.registry.path.as_ref(),
            "report.path" => self.report.path.as_ref(),
            "backup.dir" => self.backup.dir.as_ref(),
            _ => None,
        }
    }

    /// Set a key after validating it and its value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let value = Some(PathBuf::from(value));
        match key {
            "registry.path" => self.registry.path = value,
            "report.path" => self.report.path = value,
            "backup.dir" => self.backup.dir = value,
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// All keys hold paths: non-empty, no NUL bytes.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let reason = if value.trim().is_empty() {
        Some("Value must not be empty")
    } else if value.contains('\0') {
        Some("Value must not contain NUL bytes")
    } else {
        None
    };
    if let Some(reason) = reason {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
        .into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
