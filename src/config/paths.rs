//! Per-user file locations.
//!
//! The kubeconfig follows kubectl's lookup: an explicit path, then the first
//! entry of `KUBECONFIG`, then `~/.kube/config`.

use super::KzConfig;
use crate::error::KzError;
use directories::BaseDirs;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the per-user tracked settings file in the home directory.
pub const TRACKED_FILE_NAME: &str = ".kz.yml";

pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// `$XDG_CONFIG_HOME` when set to an absolute path, otherwise `~/.config`.
pub fn config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| home_dir().map(|home| home.join(".config")))
}

fn require_home() -> Result<PathBuf, KzError> {
    home_dir().ok_or_else(|| KzError::Config("unable to determine home directory".to_string()))
}

/// First non-empty entry of a `KUBECONFIG`-style path list.
fn first_kubeconfig_entry() -> Option<PathBuf> {
    let value = env::var_os("KUBECONFIG")?;
    env::split_paths(&value).find(|p| !p.as_os_str().is_empty())
}

/// Resolve the kubeconfig to read and write.
pub fn kubeconfig_path(flag: Option<&Path>, config: &KzConfig) -> Result<PathBuf, KzError> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(ref path) = config.kube.config_path {
        return Ok(path.clone());
    }
    if let Some(path) = first_kubeconfig_entry() {
        return Ok(path);
    }
    Ok(require_home()?.join(".kube").join("config"))
}

/// Resolve the tracked settings file (`~/.kz.yml` unless overridden).
pub fn tracked_path(config: &KzConfig) -> Result<PathBuf, KzError> {
    match config.tracked.path {
        Some(ref path) => Ok(path.clone()),
        None => Ok(require_home()?.join(TRACKED_FILE_NAME)),
    }
}
