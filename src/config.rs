//! Configuration System
//!
//! Settings for kz itself: where the kubeconfig and tracked settings live,
//! where releases come from, and how logging behaves. Loaded through
//! [`ConfigLoader`] with environment variable overrides. Tests included.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

mod facade;
mod merge {
    pub mod merge_policy;
}
pub mod paths;
mod sources {
    pub mod global_file;
}

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KzConfig {
    #[serde(default)]
    pub kube: KubeSettings,

    #[serde(default)]
    pub tracked: TrackedFileSettings,

    #[serde(default)]
    pub update: UpdateSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KubeSettings {
    /// Kubeconfig override; otherwise `KUBECONFIG` or `~/.kube/config`.
    #[serde(default)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackedFileSettings {
    /// Tracked settings override; otherwise `~/.kz.yml`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Release source for `kz update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// `owner/name` on GitHub
    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Archive entry holding the executable
    #[serde(default = "default_executable_name")]
    pub executable_name: String,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_repository() -> String {
    "hpcsc/kz".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_executable_name() -> String {
    crate::update::EXECUTABLE_NAME.to_string()
}

impl Default for UpdateSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            repository: default_repository(),
            timeout_secs: default_timeout_secs(),
            executable_name: default_executable_name(),
        }
    }
}

impl UpdateSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(format!("api_base_url must be an http(s) URL, got '{}'", self.api_base_url));
        }
        match self.repository.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {}
            _ => {
                return Err(format!(
                    "repository must look like 'owner/name', got '{}'",
                    self.repository
                ))
            }
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        if self.executable_name.is_empty() {
            return Err("executable_name cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Update(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Update(msg) => write!(f, "Update: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl KzConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.update.validate() {
            errors.push(ValidationError::Update(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
