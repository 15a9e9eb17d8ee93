//! Kubeconfig access: the in-memory document and its on-disk store.

use crate::error::DocumentError;
use crate::persist::atomic_write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod document;

pub use document::{AccessDocument, ContextEntry, ContextSettings};

/// Where the switch engine reads and writes the kubeconfig.
pub trait KubeConfigStore {
    fn load(&self) -> Result<AccessDocument, DocumentError>;
    fn save(&self, document: &AccessDocument) -> Result<(), DocumentError>;
}

/// Load a kubeconfig file. A missing file is an empty document.
pub fn load(path: &Path) -> Result<AccessDocument, DocumentError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Kubeconfig not found, using empty document");
            return Ok(AccessDocument::default());
        }
        Err(e) => return Err(DocumentError::io("failed to read kube config", path, e)),
    };

    AccessDocument::from_yaml(&content).map_err(|message| DocumentError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Serialize `document` and atomically replace the file at `path`.
///
/// Concurrent kz invocations are not coordinated: each save is atomic, but the
/// last rename wins.
pub fn save(path: &Path, document: &AccessDocument) -> Result<(), DocumentError> {
    let yaml = document.to_yaml().map_err(|e| {
        DocumentError::io(
            "failed to serialize kube config for",
            path,
            io::Error::new(io::ErrorKind::InvalidData, e.to_string()),
        )
    })?;
    atomic_write(path, yaml.as_bytes())
}

/// File-backed kubeconfig store.
#[derive(Debug, Clone)]
pub struct FileKubeConfig {
    path: PathBuf,
}

impl FileKubeConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KubeConfigStore for FileKubeConfig {
    fn load(&self) -> Result<AccessDocument, DocumentError> {
        load(&self.path)
    }

    fn save(&self, document: &AccessDocument) -> Result<(), DocumentError> {
        save(&self.path, document)
    }
}
