//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("update.api_base_url", "https://api.github.com")?
        .set_default("update.repository", "hpcsc/kz")?
        .set_default("update.timeout_secs", 5)?
        .set_default("update.executable_name", "kz")?
        .set_default("logging.enabled", false)?
        .set_default("logging.output", "stderr")
}
