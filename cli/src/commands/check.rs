//! `mcpdoc check`: classify every registered server and write a report.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::registry_check::run_check;
use crate::infra::clock::SystemClock;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::registry_store::JsonRegistryStore;
use crate::infra::report::JsonReportWriter;
use crate::output::progress::Spinner;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Skip probing launcher commands such as npx or node
    #[arg(long)]
    pub no_launchers: bool,
}

/// Run the check command.
///
/// A produced report is a successful run, however unhealthy the registry.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded or the report cannot be
/// written.
pub async fn run(app: &AppContext, args: &CheckArgs) -> Result<ExitCode> {
    let store = JsonRegistryStore::new(app.registry_path.clone(), app.backup_dir.clone());
    let writer = JsonReportWriter::new(app.report_path.clone());
    let runner = TokioCommandRunner::default();
    let launcher_runner = (!args.no_launchers).then_some(&runner);

    let spinner = app
        .output
        .show_progress()
        .then(|| Spinner::start("Checking servers..."));
    let outcome = run_check(&store, &LocalFs, &writer, launcher_runner, &SystemClock).await;
    drop(spinner);

    app.renderer().render_check(&outcome?, &app.registry_path)?;
    Ok(ExitCode::SUCCESS)
}
