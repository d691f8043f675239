//! `mcpdoc list`: show registered servers by category.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::registry_check::load_registry;
use crate::infra::registry_store::JsonRegistryStore;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded.
pub fn run(app: &AppContext) -> Result<ExitCode> {
    let store = JsonRegistryStore::new(app.registry_path.clone(), None);
    let registry = load_registry(&store)?;
    app.renderer().render_list(&registry, &app.registry_path)?;
    Ok(ExitCode::SUCCESS)
}
