//! Application service: settings use-cases.

use anyhow::Result;

use crate::application::ports::ConfigStore;
use crate::domain::config::DoctorConfig;

/// Load settings.
pub fn load_config(store: &impl ConfigStore) -> Result<DoctorConfig> {
    store.load()
}

/// Save settings.
pub fn save_config(store: &impl ConfigStore, config: &DoctorConfig) -> Result<()> {
    store.save(config)
}

/// Validate and persist a single key, returning the updated settings.
///
/// # Errors
///
/// Returns an error if the key or value is invalid, or the file cannot be
/// read or written. Nothing is written on validation failure.
pub fn set_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<DoctorConfig> {
    let mut config = load_config(store)?;
    config.set(key, value)?;
    save_config(store, &config)?;
    Ok(config)
}
