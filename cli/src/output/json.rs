//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one pretty-printed document to
//! stdout. Failures use the error object produced by [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use crate::application::services::registry_check::CheckOutcome;
use crate::application::services::registry_clean::{CleanOutcome, CleanPlan};
use crate::domain::category::category_of;
use crate::domain::config::DoctorConfig;
use crate::domain::error::{ConfigError, ReconcileError, RegistryError};
use crate::domain::registry::Registry;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Machine-readable code for the first typed error in the chain.
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<RegistryError>() {
            return match e {
                RegistryError::Unreadable { .. } => "registry_unreadable",
                RegistryError::InvalidJson(_) | RegistryError::Malformed(_) => "registry_invalid",
            };
        }
        if cause.downcast_ref::<ReconcileError>().is_some() {
            return "backup_failed";
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "invalid_config";
        }
    }
    "error"
}

/// Renders domain types as JSON to stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print the check report plus per-server detail.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_check(&self, outcome: &CheckOutcome, registry_path: &Path) -> Result<()> {
        let servers: Vec<serde_json::Value> = outcome
            .verdicts
            .iter()
            .map(|v| {
                let kind = outcome
                    .registry
                    .get(&v.name)
                    .map_or("unrecognized", |e| e.kind_label());
                json!({
                    "name": v.name,
                    "category": category_of(&v.name),
                    "kind": kind,
                    "state": v.verdict.state,
                    "is_advanced": v.verdict.is_advanced,
                    "issues": v.verdict.issues,
                    "recommendations": v.verdict.recommendations,
                })
            })
            .collect();
        let mut out = serde_json::to_value(&outcome.report).context("serializing report")?;
        if let Some(obj) = out.as_object_mut() {
            obj.insert("registry".into(), json!(registry_path));
            obj.insert("report_path".into(), json!(outcome.report_path));
            obj.insert("servers".into(), json!(servers));
        }
        print_pretty(&out)
    }

    /// Print entries with kind, category and launch target.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_list(&self, registry: &Registry, registry_path: &Path) -> Result<()> {
        let servers: Vec<serde_json::Value> = registry
            .entries()
            .iter()
            .map(|e| {
                json!({
                    "name": e.name,
                    "category": category_of(&e.name),
                    "kind": e.kind_label(),
                    "command": e.command(),
                    "path": e.launch_path(),
                })
            })
            .collect();
        print_pretty(&json!({
            "registry": registry_path,
            "total": registry.len(),
            "servers": servers,
        }))
    }

    /// Print a dry-run cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_clean_plan(&self, plan: &CleanPlan, registry_path: &Path) -> Result<()> {
        print_pretty(&json!({
            "registry": registry_path,
            "dry_run": true,
            "total": plan.total,
            "kept": plan.total - plan.removed().len(),
            "removed": plan.removed(),
            "unverified": plan.unverified(),
        }))
    }

    /// Print an applied cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_clean_outcome(&self, outcome: &CleanOutcome) -> Result<()> {
        let backup = outcome.backup.as_ref().map(|b| {
            json!({
                "path": b.path,
                "sha256": b.sha256,
            })
        });
        print_pretty(&json!({
            "dry_run": false,
            "kept": outcome.kept,
            "removed": outcome.removed,
            "backup": backup,
        }))
    }

    /// Print settings and their file location.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &DoctorConfig, path: &Path) -> Result<()> {
        print_pretty(&json!({
            "path": path,
            "config": config,
        }))
    }

    /// Print the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        print_pretty(&json!({ "version": version }))
    }
}

fn print_pretty(value: &serde_json::Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}
