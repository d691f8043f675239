//! `mcpdoc clean`: drop entries whose script no longer exists.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::registry_clean::{apply_clean, plan_clean};
use crate::infra::clock::SystemClock;
use crate::infra::fs::LocalFs;
use crate::infra::registry_store::JsonRegistryStore;
use crate::output::TerminalReporter;

/// Arguments for the clean command.
#[derive(Args)]
pub struct CleanArgs {
    /// Show what would be removed without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the clean command.
///
/// # Errors
///
/// Returns an error if the registry cannot be read, the backup fails, or the
/// cleaned document cannot be written.
pub fn run(app: &AppContext, args: &CleanArgs) -> Result<ExitCode> {
    let store = JsonRegistryStore::new(app.registry_path.clone(), app.backup_dir.clone());
    let plan = plan_clean(&store, &LocalFs)?;

    if args.dry_run {
        app.renderer().render_clean_plan(&plan, &app.registry_path)?;
        return Ok(ExitCode::SUCCESS);
    }

    if !plan.is_noop() {
        if !app.is_json() {
            app.renderer().render_clean_plan(&plan, &app.registry_path)?;
        }
        let prompt = format!(
            "Remove {} of {} entries from {}?",
            plan.removed().len(),
            plan.total,
            app.registry_path.display()
        );
        if !app.confirm(&prompt, false)? {
            app.output.info("Cancelled.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let reporter = TerminalReporter::new(&app.output);
    let outcome = apply_clean(&store, &reporter, &SystemClock, plan)?;
    app.renderer().render_clean_outcome(&outcome)?;
    Ok(ExitCode::SUCCESS)
}
