//! kz: switch kubeconfig context and namespace by partial name
//!
//! Resolves a partial query against the contexts declared in the kubeconfig
//! (or the namespaces tracked in `~/.kz.yml`), asks the user to pick when the
//! query is ambiguous and rewrites the kubeconfig atomically. Also updates its
//! own executable from the latest GitHub release.

pub mod cli;
pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod logging;
pub mod matcher;
pub mod persist;
pub mod release;
pub mod selector;
pub mod switch;
pub mod tracked;
pub mod update;

/// Version reported by `--version` and compared against release tags by
/// `update`. Release builds set `KZ_VERSION` to the tag being published.
pub const VERSION: &str = match option_env!("KZ_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
