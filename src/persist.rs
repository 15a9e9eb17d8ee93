//! Atomic file replacement shared by the kubeconfig and tracked-settings stores.

use crate::error::DocumentError;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Deserialize an explicit YAML `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Write `contents` to `path` so that readers only ever observe the old or the
/// new file.
///
/// The bytes go to a temporary file in the target's directory, are flushed to
/// disk, and the temporary file is then renamed over `path`. On failure the
/// temporary file is removed and `path` is left as it was.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), DocumentError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|e| DocumentError::io("failed to create directory", parent, e))?;

    let existing_permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| DocumentError::io("failed to create temporary file in", parent, e))?;
    temp.write_all(contents)
        .map_err(|e| DocumentError::io("failed to write", temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| DocumentError::io("failed to sync", temp.path(), e))?;

    // NamedTempFile is created 0600; keep whatever mode the replaced file had.
    if let Some(permissions) = existing_permissions {
        fs::set_permissions(temp.path(), permissions)
            .map_err(|e| DocumentError::io("failed to set permissions on", temp.path(), e))?;
    }

    temp.persist(path)
        .map_err(|e| DocumentError::io("failed to replace", path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "Document written");
    Ok(())
}

fn resolve_target(path: &Path) -> Result<PathBuf, DocumentError> {
    if fs::metadata(path).is_err() {
        return Ok(path.to_path_buf());
    }
    fs::canonicalize(path).map_err(|e| DocumentError::io("failed to resolve", path, e))
}
