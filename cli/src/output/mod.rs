//! Output formatting module

pub mod human;
pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use std::path::Path;

use anyhow::Result;
use console::Term;
use owo_colors::OwoColorize as _;
pub use styles::Styles;

pub use human::HumanRenderer;
pub use json::JsonRenderer;
pub use reporter::TerminalReporter;

use crate::application::services::registry_check::CheckOutcome;
use crate::application::services::registry_clean::{CleanOutcome, CleanPlan};
use crate::domain::config::DoctorConfig;
use crate::domain::registry::Registry;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether stdout is a TTY.
    pub is_tty: bool,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = Term::stdout().is_term();
        let use_colors = !no_color && is_tty && std::env::var("NO_COLOR").is_err();

        let styles = if use_colors {
            Styles::colored()
        } else {
            Styles::default()
        };

        Self {
            styles,
            is_tty,
            quiet,
        }
    }

    /// Check if progress indicators should be shown.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        self.is_tty && !self.quiet
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Print a warning message prefixed with `⚠`. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "⚠".style(self.styles.warning));
        }
    }

    /// Print an info message prefixed with `ℹ`. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {msg}", "ℹ".style(self.styles.info));
        }
    }

    /// Print a key-value pair with the key dimmed. Suppressed when `quiet`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {}  {value}", key.style(self.styles.dim));
        }
    }
}

/// Dispatches rendering to the human or JSON renderer.
pub enum Renderer<'a> {
    Human(HumanRenderer<'a>),
    Json(JsonRenderer),
}

impl Renderer<'_> {
    /// Render a completed health check.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_check(&self, outcome: &CheckOutcome, registry_path: &Path) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_check(outcome, registry_path);
                Ok(())
            }
            Renderer::Json(r) => r.render_check(outcome, registry_path),
        }
    }

    /// Render the registry grouped by category.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_list(&self, registry: &Registry, registry_path: &Path) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_list(registry, registry_path);
                Ok(())
            }
            Renderer::Json(r) => r.render_list(registry, registry_path),
        }
    }

    /// Render what a cleanup would do.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_clean_plan(&self, plan: &CleanPlan, registry_path: &Path) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_clean_plan(plan, registry_path);
                Ok(())
            }
            Renderer::Json(r) => r.render_clean_plan(plan, registry_path),
        }
    }

    /// Render an applied cleanup.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_clean_outcome(&self, outcome: &CleanOutcome) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_clean_outcome(outcome);
                Ok(())
            }
            Renderer::Json(r) => r.render_clean_outcome(outcome),
        }
    }

    /// Render the current settings.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_config(&self, config: &DoctorConfig, path: &Path) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_config(config, path);
                Ok(())
            }
            Renderer::Json(r) => r.render_config(config, path),
        }
    }

    /// Render the CLI version.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render_version(&self, version: &str) -> Result<()> {
        match self {
            Renderer::Human(r) => {
                r.render_version(version);
                Ok(())
            }
            Renderer::Json(r) => r.render_version(version),
        }
    }
}
