//! Configuration loading facade.

use super::merge::merge_policy;
use super::sources::global_file;
use super::KzConfig;
use crate::error::KzError;
use config::{Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Loads [`KzConfig`] from its layered sources.
///
/// Precedence, lowest first: built-in defaults, the global config file,
/// an explicit `--config` file, then `KZ_*` environment variables
/// (`KZ_UPDATE__TIMEOUT_SECS=10` sets `update.timeout_secs`).
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, optionally layering an explicit file over the global one.
    pub fn load(explicit: Option<&Path>) -> Result<KzConfig, KzError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(KzError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("KZ")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: KzConfig = builder.build()?.try_deserialize()?;
        Self::validated(config)
    }

    /// Load configuration from a single file, without global or env layers.
    pub fn load_from_file(path: &Path) -> Result<KzConfig, KzError> {
        let config: KzConfig = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Self::validated(config)
    }

    /// Location of the global config file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn validated(config: KzConfig) -> Result<KzConfig, KzError> {
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            KzError::Config(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(config)
    }
}
