//! Infrastructure implementation of the `ConfigStore` port, plus the default
//! locations of every mcpdoc file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::DoctorConfig;

/// Environment variable overriding the settings file location.
pub const CONFIG_ENV: &str = "MCPDOC_CONFIG";

/// `~/.mcpdoc`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn mcpdoc_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
        .map(|h| h.join(".mcpdoc"))
}

/// Default registry document: `~/.mcpdoc/mcp.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_registry_path() -> Result<PathBuf> {
    Ok(mcpdoc_dir()?.join("mcp.json"))
}

/// Default report artifact: `~/.mcpdoc/health-report.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_report_path() -> Result<PathBuf> {
    Ok(mcpdoc_dir()?.join("health-report.json"))
}

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<DoctorConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(DoctorConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &DoctorConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("cannot set permissions on {}", path.display()))?;
        }
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        Ok(mcpdoc_dir()?.join("config.yaml"))
    }
}
