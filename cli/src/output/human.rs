//! Human-readable terminal renderer.

use std::path::Path;

use mcpdoc_common::HealthState;
use owo_colors::OwoColorize as _;

use crate::application::services::registry_check::CheckOutcome;
use crate::application::services::registry_clean::{CleanOutcome, CleanPlan};
use crate::domain::category::categories_of;
use crate::domain::classify::HealthVerdict;
use crate::domain::config::{DoctorConfig, VALID_CONFIG_KEYS};
use crate::domain::registry::{EntryDescriptor, Registry};
use crate::domain::report::EntryVerdict;
use crate::output::OutputContext;

/// Label for entries outside every category.
const UNCATEGORIZED: &str = "Other";

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("mcpdoc {version}");
    }

    /// Render check results: entries by category, launchers, summary, findings.
    pub fn render_check(&self, outcome: &CheckOutcome, registry_path: &Path) {
        let ctx = self.ctx;
        if ctx.quiet {
            return;
        }
        println!();
        println!(
            "  {}",
            format!("MCP Registry Health ({})", registry_path.display()).style(ctx.styles.header)
        );
        println!();

        if outcome.verdicts.is_empty() {
            ctx.info("No servers registered.");
            println!();
        }

        let names: Vec<&str> = outcome.verdicts.iter().map(|v| v.name.as_str()).collect();
        for (label, group) in grouped(&names) {
            println!("  {label}:");
            for name in group {
                if let (Some(v), Some(entry)) = (
                    outcome.verdicts.iter().find(|v| v.name == name),
                    outcome.registry.get(name),
                ) {
                    self.print_verdict(entry, v);
                }
            }
            println!();
        }

        if !outcome.report.launchers.is_empty() {
            println!("  Launchers:");
            for launcher in &outcome.report.launchers {
                let detail = launcher.version.as_deref().unwrap_or("not found");
                self.print_check(launcher.found, &format!("{} {detail}", launcher.command));
            }
            println!();
        }

        let summary: Vec<String> = HealthState::ALL
            .iter()
            .map(|s| format!("{} {}", outcome.report.count(*s), state_label(*s)))
            .collect();
        ctx.kv("Summary:", &summary.join(" · "));
        println!();

        if !outcome.report.issues.is_empty() {
            println!("  Issues:");
            for issue in &outcome.report.issues {
                println!("    {} {issue}", "⚠".style(ctx.styles.warning));
            }
            println!();
        }
        if !outcome.report.recommendations.is_empty() {
            println!("  Recommendations:");
            for rec in &outcome.report.recommendations {
                println!("    {} {rec}", "→".style(ctx.styles.info));
            }
            println!();
        }

        if outcome.report.is_healthy() {
            println!(
                "  {} Everything looks good!",
                "✓".style(ctx.styles.success)
            );
        } else {
            println!(
                "  {} {} of {} servers need attention.",
                "✗".style(ctx.styles.error),
                outcome.report.total - outcome.report.count(HealthState::Ready),
                outcome.report.total,
            );
        }
        ctx.kv("Report:", &outcome.report_path.display().to_string());
        println!();
    }

    /// Render registry entries grouped by category.
    pub fn render_list(&self, registry: &Registry, registry_path: &Path) {
        if self.ctx.quiet {
            return;
        }
        if registry.is_empty() {
            println!("No servers registered in {}.", registry_path.display());
            return;
        }

        println!("Servers in {}:\n", registry_path.display());
        let names: Vec<&str> = registry.names().collect();
        for (label, group) in grouped(&names) {
            println!("  {label}:");
            for name in group {
                let Some(entry) = registry.get(name) else {
                    continue;
                };
                let target = entry
                    .launch_path()
                    .or_else(|| entry.command())
                    .unwrap_or("");
                println!("    {name:<24} {:<13} {target}", entry.kind_label());
            }
            println!();
        }
    }

    /// Render a cleanup that has not been applied.
    pub fn render_clean_plan(&self, plan: &CleanPlan, registry_path: &Path) {
        let ctx = self.ctx;
        if ctx.quiet {
            return;
        }
        println!();
        println!(
            "  {}",
            format!("Registry cleanup ({})", registry_path.display()).style(ctx.styles.header)
        );
        println!();
        if plan.is_noop() {
            ctx.success(&format!("All {} entries resolve. Nothing to remove.", plan.total));
        } else {
            println!("  Would remove {} of {} entries:", plan.removed().len(), plan.total);
            for name in plan.removed() {
                println!("    {} {name}", "✗".style(ctx.styles.error));
            }
        }
        if !plan.unverified().is_empty() {
            println!();
            ctx.warn("Kept because their script path could not be checked:");
            for name in plan.unverified() {
                println!("    {name}");
            }
        }
        println!();
    }

    /// Render an applied cleanup.
    pub fn render_clean_outcome(&self, outcome: &CleanOutcome) {
        let ctx = self.ctx;
        if ctx.quiet {
            return;
        }
        println!();
        ctx.kv("Kept:", &outcome.kept.to_string());
        if outcome.removed.is_empty() {
            ctx.kv("Removed:", "none");
        } else {
            ctx.kv("Removed:", &outcome.removed.join(", "));
        }
        if let Some(backup) = &outcome.backup {
            let preview: String = backup.sha256.chars().take(12).collect();
            ctx.kv(
                "Backup:",
                &format!("{} (SHA256: {preview}...)", backup.path.display()),
            );
            println!("      Restore with: cp \"{}\" <registry>", backup.path.display());
        }
        println!();
    }

    /// Render the current settings.
    pub fn render_config(&self, config: &DoctorConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for key in VALID_CONFIG_KEYS {
            let value = config
                .get(key)
                .map_or_else(|| "(default)".to_string(), |p| p.display().to_string());
            println!("  {:<20} {value}", format!("{key}:"));
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["MCPDOC_CONFIG", "MCPDOC_REGISTRY", "MCPDOC_REPORT", "NO_COLOR"] {
            println!(
                "    {:<18} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    fn print_verdict(&self, entry: &EntryDescriptor, item: &EntryVerdict) {
        let HealthVerdict {
            state, is_advanced, ..
        } = &item.verdict;
        let (mark, style) = self.ctx.styles.state(*state);
        let advanced = if *is_advanced {
            format!(" {}", "(advanced)".style(self.ctx.styles.advanced))
        } else {
            String::new()
        };
        println!(
            "    {} {:<24} {:<13} {}{advanced}",
            mark.style(style),
            item.name,
            entry.kind_label(),
            state_label(*state),
        );
    }

    fn print_check(&self, ok: bool, msg: &str) {
        if ok {
            println!("    {} {msg}", "✓".style(self.ctx.styles.success));
        } else {
            println!("    {} {msg}", "✗".style(self.ctx.styles.error));
        }
    }
}

/// Human wording for a state.
#[must_use]
pub fn state_label(state: HealthState) -> &'static str {
    match state {
        HealthState::Ready => "ready",
        HealthState::NeedsConfiguration => "needs configuration",
        HealthState::Missing => "missing",
        HealthState::Unknown => "unknown",
    }
}

/// Category groups followed by an "Other" group holding every remaining name,
/// so each entry is displayed exactly once.
fn grouped<'n>(names: &[&'n str]) -> Vec<(&'static str, Vec<&'n str>)> {
    let categorized = categories_of(names);
    let mut groups: Vec<(&'static str, Vec<&'n str>)> = categorized
        .iter()
        .map(|(label, members)| {
            let members = names
                .iter()
                .copied()
                .filter(|n| members.iter().any(|m| m == n))
                .collect();
            (*label, members)
        })
        .collect();
    let other: Vec<&'n str> = names
        .iter()
        .copied()
        .filter(|n| !categorized.iter().flat_map(|(_, m)| m).any(|m| m == n))
        .collect();
    if !other.is_empty() {
        groups.push((UNCATEGORIZED, other));
    }
    groups
}
