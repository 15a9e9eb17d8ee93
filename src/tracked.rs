//! Tracked namespaces and synced contexts, persisted in `~/.kz.yml`.

use crate::error::DocumentError;
use crate::matcher::matching;
use crate::persist::{atomic_write, null_as_default};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Contents of the tracked-settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedSettings {
    /// Context names recorded by `ctx sync`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<String>,

    /// Namespaces offered for partial matching, in insertion order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespaces: Vec<String>,
}

impl TrackedSettings {
    /// Append namespaces that are not tracked yet. Idempotent.
    pub fn add_namespaces<S: AsRef<str>>(&mut self, namespaces: &[S]) {
        for namespace in namespaces.iter().map(AsRef::as_ref) {
            if !self.namespaces.iter().any(|n| n == namespace) {
                self.namespaces.push(namespace.to_string());
            }
        }
    }

    /// Remove every listed namespace; unknown names are ignored.
    pub fn delete_namespaces<S: AsRef<str>>(&mut self, namespaces: &[S]) {
        self.namespaces
            .retain(|n| !namespaces.iter().any(|d| d.as_ref() == n));
    }

    pub fn namespaces_matching(&self, query: &str) -> Vec<String> {
        matching(query, &self.namespaces)
    }
}

/// Where tracked settings are read from and written to.
pub trait TrackedStore {
    fn load(&self) -> Result<TrackedSettings, DocumentError>;
    fn save(&self, settings: &TrackedSettings) -> Result<(), DocumentError>;
}

/// File-backed tracked-settings store.
#[derive(Debug, Clone)]
pub struct FileTrackedStore {
    path: PathBuf,
}

impl FileTrackedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrackedStore for FileTrackedStore {
    fn load(&self) -> Result<TrackedSettings, DocumentError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TrackedSettings::default()),
            Err(e) => {
                return Err(DocumentError::io(
                    "failed to load yaml config from location",
                    &self.path,
                    e,
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(TrackedSettings::default());
        }

        serde_yaml::from_str(&content).map_err(|e| DocumentError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, settings: &TrackedSettings) -> Result<(), DocumentError> {
        let yaml = serde_yaml::to_string(settings).map_err(|e| {
            DocumentError::io(
                "failed to marshal config for",
                &self.path,
                io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
            )
        })?;
        atomic_write(&self.path, yaml.as_bytes())
    }
}
