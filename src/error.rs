//! Error types for kz.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, mutating or persisting an on-disk document
/// (the kubeconfig or the tracked-settings file).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("context with name {0} does not exist in kube config file")]
    NotFound(String),

    #[error("unable to switch namespace to {0} because current context is not set")]
    NoCurrentContext(String),

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DocumentError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Top-level error surfaced by every kz command.
#[derive(Debug, Error)]
pub enum KzError {
    #[error("{0}")]
    Validation(String),

    #[error("no contexts matched query '{0}'")]
    NoMatch(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("failed to get user selection: {0}")]
    Selection(String),

    #[error("{0}")]
    Gateway(String),

    #[error("no artifact available for release {tag} and current CPU architecture {arch}")]
    NoMatchingAsset { tag: String, arch: String },

    #[error("invalid archive from {url}, no {executable} binary found")]
    NoExecutableInArchive { url: String, executable: String },

    #[error("failed to read archive file: {0}")]
    Archive(String),

    #[error("{0}")]
    Replace(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for KzError {
    fn from(err: config::ConfigError) -> Self {
        KzError::Config(err.to_string())
    }
}
