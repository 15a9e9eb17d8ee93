//! Atomic replacement of the running executable.
//!
//! The new binary is written next to the target (same filesystem) and renamed
//! over it. Until the rename succeeds the old executable is untouched. Platforms
//! that refuse to rename over a running executable (Windows) report the rename
//! failure and keep the old binary.

use crate::error::KzError;
use std::io::{self, Read};
use std::path::Path;

/// Replace `target` with the bytes read from `content`, marked executable.
pub fn replace_executable<R: Read>(target: &Path, temp_prefix: &str, mut content: R) -> Result<(), KzError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(temp_prefix)
        .tempfile_in(dir)
        .map_err(|e| KzError::Replace(format!("failed to create temporary file: {}", e)))?;

    io::copy(&mut content, temp.as_file_mut()).map_err(|e| {
        KzError::Replace(format!(
            "failed to copy file content from archive to temporary file: {}",
            e
        ))
    })?;
    temp.as_file()
        .sync_all()
        .map_err(|e| KzError::Replace(format!("failed to sync temporary file: {}", e)))?;

    mark_executable(temp.path())
        .map_err(|e| KzError::Replace(format!("failed to change temporary file mode: {}", e)))?;

    let temp_path = temp.path().to_path_buf();
    temp.persist(target).map_err(|e| {
        KzError::Replace(format!(
            "failed to rename {} to {}: {}",
            temp_path.display(),
            target.display(),
            e.error
        ))
    })?;

    tracing::debug!(target = %target.display(), "Executable replaced");
    Ok(())
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}
