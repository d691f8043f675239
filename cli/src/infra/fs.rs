//! Filesystem infrastructure: implements `PathProbe` and atomic file writes.

use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::application::ports::PathProbe;

/// Production filesystem implementation of `PathProbe`.
pub struct LocalFs;

impl PathProbe for LocalFs {
    fn exists(&self, path: &str) -> std::io::Result<bool> {
        let found = Path::new(path).try_exists();
        match &found {
            Ok(exists) => tracing::debug!(%path, exists, "probed path"),
            Err(e) => tracing::warn!(%path, error = %e, "path probe failed"),
        }
        found
    }
}

/// Replace `path` with `contents` atomically (temp file in the same directory,
/// then rename).
///
/// Permissions of an existing file are carried over; new files get `mode` on
/// unix.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any write step
/// fails. On error `path` is left as it was.
pub fn write_atomic(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    temp.write_all(contents)
        .with_context(|| format!("writing temp file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("syncing temp file for {}", path.display()))?;

    match std::fs::metadata(path) {
        Ok(meta) => std::fs::set_permissions(temp.path(), meta.permissions())
            .with_context(|| format!("copying permissions of {}", path.display()))?,
        Err(_) => set_mode(temp.path(), mode)?,
    }

    temp.persist(path)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}

fn set_mode(path: &Path, _mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(_mode))
            .with_context(|| format!("setting permissions on {}", path.display()))?;
    }
    Ok(())
}
