//! Infrastructure implementation of the `RegistryStore` port.
//!
//! The registry is a JSON file. Backups are written next to it (or into a
//! configured directory) with create-new semantics so an existing backup is
//! never overwritten.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::application::ports::RegistryStore;
use crate::domain::error::RegistryError;
use crate::infra::fs::write_atomic;

/// Timestamp embedded in backup file names. Sorts lexically by capture time.
const BACKUP_STAMP: &str = "%Y%m%dT%H%M%S%.6fZ";

/// Give up after this many same-timestamp collisions.
const MAX_BACKUP_ATTEMPTS: u32 = 1000;

/// Backups hold the same secrets as the registry.
#[cfg(unix)]
const BACKUP_MODE: u32 = 0o600;

/// JSON file registry.
pub struct JsonRegistryStore {
    path: PathBuf,
    backup_dir: Option<PathBuf>,
}

impl JsonRegistryStore {
    #[must_use]
    pub fn new(path: PathBuf, backup_dir: Option<PathBuf>) -> Self {
        Self { path, backup_dir }
    }

    /// Backup path for a capture time, before collision handling.
    #[must_use]
    pub fn backup_path(&self, taken_at: DateTime<Utc>) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "registry".into(), |n| n.to_string_lossy().into_owned());
        let name = format!("{file_name}.backup.{}", taken_at.format(BACKUP_STAMP));
        match &self.backup_dir {
            Some(dir) => dir.join(name),
            None => self
                .path
                .parent()
                .map_or_else(|| PathBuf::from(&name), |p| p.join(&name)),
        }
    }
}

impl RegistryStore for JsonRegistryStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|source| {
            RegistryError::Unreadable {
                path: self.path.clone(),
                source,
            }
            .into()
        })
    }

    fn backup(&self, original: &[u8], taken_at: DateTime<Utc>) -> Result<PathBuf> {
        let base = self.backup_path(taken_at);
        if let Some(dir) = base.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating backup directory {}", dir.display()))?;
        }

        for attempt in 0..MAX_BACKUP_ATTEMPTS {
            let candidate = if attempt == 0 {
                base.clone()
            } else {
                let mut name = base.as_os_str().to_owned();
                name.push(format!(".{attempt}"));
                PathBuf::from(name)
            };
            let mut options = std::fs::OpenOptions::new();
            options.write(true).create_new(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt as _;
                options.mode(BACKUP_MODE);
            }
            let mut file = match options.open(&candidate) {
                Ok(f) => f,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("creating backup {}", candidate.display()));
                }
            };
            file.write_all(original)
                .and_then(|()| file.sync_all())
                .with_context(|| format!("writing backup {}", candidate.display()))?;
            tracing::debug!(backup = %candidate.display(), bytes = original.len(), "backup created");
            return Ok(candidate);
        }
        anyhow::bail!(
            "too many backups named {}; remove old backups and retry",
            base.display()
        )
    }

    fn read_backup(&self, backup: &Path) -> Result<Vec<u8>> {
        std::fs::read(backup).with_context(|| format!("reading backup {}", backup.display()))
    }

    fn write(&self, contents: &[u8]) -> Result<()> {
        write_atomic(&self.path, contents, 0o600)
            .with_context(|| format!("cannot write registry {}", self.path.display()))
    }
}
