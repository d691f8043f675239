//! Application context: unified state passed to every command handler.
//!
//! Resolves where the registry, report and backups live (flag or env var,
//! then the settings file, then the built-in default) once, so command
//! handlers only deal with concrete paths.

use std::path::PathBuf;

use anyhow::Result;

use crate::application::ports::ConfigStore as _;
use crate::domain::config::DoctorConfig;
use crate::infra::config::{YamlConfigStore, default_registry_path, default_report_path};
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `MCPDOC_YES` env vars).
    pub yes: bool,
}

/// Path overrides given on the command line or through the environment.
#[derive(Default)]
pub struct PathFlags {
    pub registry: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// File location overrides.
    pub paths: PathFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Settings file store.
    pub config_store: YamlConfigStore,
    /// Registry document to check or clean.
    pub registry_path: PathBuf,
    /// Where the health report is persisted.
    pub report_path: PathBuf,
    /// Directory for registry backups; `None` places them beside the registry.
    pub backup_dir: Option<PathBuf>,
    /// When `true`, skip interactive prompts.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `MCPDOC_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be parsed or the home
    /// directory cannot be determined for a default path.
    pub fn new(flags: AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("MCPDOC_YES").is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        // Human chatter on stdout would corrupt the JSON document.
        let quiet = flags.output.quiet || flags.output.json;

        let config_store = YamlConfigStore;
        let settings = config_store.load()?;
        let (registry_path, report_path, backup_dir) = resolve_paths(flags.paths, settings)?;
        tracing::debug!(
            registry = %registry_path.display(),
            report = %report_path.display(),
            "resolved paths"
        );

        Ok(Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            config_store,
            registry_path,
            report_path,
            backup_dir,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `MCPDOC_YES` env),
    /// returns `true` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(true);
        }
        if !console::Term::stderr().is_term() {
            anyhow::bail!("{prompt} needs confirmation; re-run with --yes");
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }
}

/// Flag or env var, then settings, then default.
fn resolve_paths(
    flags: PathFlags,
    settings: DoctorConfig,
) -> Result<(PathBuf, PathBuf, Option<PathBuf>)> {
    let registry = match flags.registry.or(settings.registry.path) {
        Some(p) => p,
        None => default_registry_path()?,
    };
    let report = match flags.report.or(settings.report.path) {
        Some(p) => p,
        None => default_report_path()?,
    };
    Ok((registry, report, settings.backup.dir))
}
