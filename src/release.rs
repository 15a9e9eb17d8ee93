//! Release gateway: where kz learns about and downloads newer builds.

use crate::error::KzError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod github;

pub use github::GithubGateway;

/// Latest published release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

impl ReleaseAsset {
    pub fn new(download_url: impl Into<String>) -> Self {
        Self {
            download_url: download_url.into(),
        }
    }
}

/// Release source trait
#[async_trait]
pub trait ReleaseGateway: Send + Sync {
    /// Fetch the latest release manifest.
    async fn latest_release(&self) -> Result<ReleaseManifest, KzError>;

    /// Download an asset's bytes.
    async fn download(&self, url: &str) -> Result<Vec<u8>, KzError>;
}

/// Scripted gateway for update tests.
#[cfg(test)]
pub(crate) struct FakeGateway {
    release: Result<ReleaseManifest, String>,
    archive: Result<Vec<u8>, String>,
    downloads: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl FakeGateway {
    pub(crate) fn new(release: Result<ReleaseManifest, String>, archive: Result<Vec<u8>, String>) -> Self {
        Self {
            release,
            archive,
            downloads: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ReleaseGateway for FakeGateway {
    async fn latest_release(&self) -> Result<ReleaseManifest, KzError> {
        self.release.clone().map_err(KzError::Gateway)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, KzError> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.archive.clone().map_err(KzError::Gateway)
    }
}
