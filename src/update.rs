//! Self-update: replace the running kz with the latest released build.
//!
//! A run moves through fixed phases:
//!
//! `Fetching -> Comparing -> Selecting -> Downloading -> Extracting -> Replacing -> Done`
//!
//! Any phase may move to `Failed` instead; the error is returned as is and the
//! phase it happened in is logged. The current executable only changes in the final rename of the
//! `Replacing` phase.

use crate::error::KzError;
use crate::release::{ReleaseAsset, ReleaseGateway, ReleaseManifest};
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub mod archive;
pub mod replace;

/// Name of the executable entry inside release archives.
pub const EXECUTABLE_NAME: &str = "kz";

/// Step of an update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    Fetching,
    Comparing,
    Selecting,
    Downloading,
    Extracting,
    Replacing,
    Done,
    Failed,
}

impl UpdatePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, UpdatePhase::Done | UpdatePhase::Failed)
    }
}

impl fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpdatePhase::Fetching => "fetching",
            UpdatePhase::Comparing => "comparing",
            UpdatePhase::Selecting => "selecting",
            UpdatePhase::Downloading => "downloading",
            UpdatePhase::Extracting => "extracting",
            UpdatePhase::Replacing => "replacing",
            UpdatePhase::Done => "done",
            UpdatePhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Result of a successful update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    AlreadyLatest { executable: String, tag: String },
    Updated { tag: String },
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::AlreadyLatest { executable, tag } => {
                write!(f, "{} is already at latest version {}", executable, tag)
            }
            UpdateOutcome::Updated { tag } => write!(f, "updated to {}", tag),
        }
    }
}

/// Architecture name used in release asset names (`amd64`, `arm64`, ...).
pub fn release_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}

/// Strip one optional leading `v`.
pub fn normalize_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

/// First asset built for `arch`, in manifest order.
pub fn select_asset<'m>(manifest: &'m ReleaseManifest, arch: &str) -> Option<&'m ReleaseAsset> {
    let suffix = format!("{}.tar.gz", arch);
    manifest
        .assets
        .iter()
        .find(|asset| asset.download_url.contains(&suffix))
}

/// Drives a single update run against a release gateway.
pub struct UpdateEngine<'a> {
    gateway: &'a dyn ReleaseGateway,
    arch: String,
    current_executable: PathBuf,
    executable_name: String,
}

impl<'a> UpdateEngine<'a> {
    pub fn new(
        gateway: &'a dyn ReleaseGateway,
        arch: impl Into<String>,
        current_executable: impl Into<PathBuf>,
    ) -> Self {
        Self {
            gateway,
            arch: arch.into(),
            current_executable: current_executable.into(),
            executable_name: EXECUTABLE_NAME.to_string(),
        }
    }

    /// Override the archive entry name to install.
    pub fn with_executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = name.into();
        self
    }

    /// Update from `current_version` to the latest release.
    pub async fn update_from(&self, current_version: &str) -> Result<UpdateOutcome, KzError> {
        let mut phase = UpdatePhase::Fetching;
        self.update_tracking(current_version, &mut phase).await
    }

    /// Like [`update_from`](Self::update_from), leaving the terminal phase in
    /// `phase`: `Done` on success, `Failed` on any error.
    pub async fn update_tracking(
        &self,
        current_version: &str,
        phase: &mut UpdatePhase,
    ) -> Result<UpdateOutcome, KzError> {
        let result = self.run(current_version, phase).await;
        if let Err(ref e) = result {
            warn!(phase = %phase, error = %e, "Update failed");
            enter(phase, UpdatePhase::Failed);
        }
        result
    }

    async fn run(&self, current_version: &str, phase: &mut UpdatePhase) -> Result<UpdateOutcome, KzError> {
        enter(phase, UpdatePhase::Fetching);
        let manifest = self.gateway.latest_release().await?;
        let tag = manifest.tag_name.clone();

        enter(phase, UpdatePhase::Comparing);
        if normalize_version(&tag) == normalize_version(current_version) {
            enter(phase, UpdatePhase::Done);
            return Ok(UpdateOutcome::AlreadyLatest {
                executable: self.executable_name.clone(),
                tag,
            });
        }

        enter(phase, UpdatePhase::Selecting);
        let asset = select_asset(&manifest, &self.arch).ok_or_else(|| KzError::NoMatchingAsset {
            tag: tag.clone(),
            arch: self.arch.clone(),
        })?;

        enter(phase, UpdatePhase::Downloading);
        let bytes = self.gateway.download(&asset.download_url).await?;
        debug!(url = %asset.download_url, bytes = bytes.len(), "Downloaded release archive");

        enter(phase, UpdatePhase::Extracting);
        let mut tarball = archive::open(&bytes);
        let entry = archive::find_entry(&mut tarball, &self.executable_name)?.ok_or_else(|| {
            KzError::NoExecutableInArchive {
                url: asset.download_url.clone(),
                executable: self.executable_name.clone(),
            }
        })?;

        enter(phase, UpdatePhase::Replacing);
        let temp_prefix = format!("{}-{}", self.executable_name, tag);
        replace::replace_executable(&self.current_executable, &temp_prefix, entry)?;

        enter(phase, UpdatePhase::Done);
        info!(tag = %tag, executable = %self.current_executable.display(), "Updated executable");
        Ok(UpdateOutcome::Updated { tag })
    }
}

fn enter(phase: &mut UpdatePhase, next: UpdatePhase) {
    debug!(from = %phase, to = %next, "Update phase");
    *phase = next;
}
