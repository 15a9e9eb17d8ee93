//! CLI parse: clap types for kz. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kz - switch kubeconfig context and namespace by partial name
#[derive(Parser, Debug)]
#[command(name = "kz", version = crate::VERSION)]
#[command(about = "Switch kubeconfig context and namespace by partial name")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Context query, optionally followed by a namespace query ("-" keeps the current context)
    #[arg(value_name = "CONTEXT_AND_NAMESPACE")]
    pub args: Vec<String>,

    /// Kubeconfig file to read and modify
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Switch context by partial name, or manage synced contexts
    #[command(alias = "context", args_conflicts_with_subcommands = true)]
    Ctx {
        #[command(subcommand)]
        command: Option<CtxCommands>,

        /// Partial context name
        query: Option<String>,
    },
    /// Switch namespace of the current context by partial name, or manage tracked namespaces
    #[command(alias = "namespace", args_conflicts_with_subcommands = true)]
    Ns {
        #[command(subcommand)]
        command: Option<NsCommands>,

        /// Partial namespace name
        query: Option<String>,
    },
    /// Replace this executable with the latest release
    Update,
}

#[derive(Subcommand, Debug)]
pub enum CtxCommands {
    /// Record the kubeconfig's context names in the tracked settings
    Sync,
    /// List synced contexts
    List,
}

#[derive(Subcommand, Debug)]
pub enum NsCommands {
    /// Track namespaces for partial matching
    Add {
        /// Namespace names
        names: Vec<String>,
    },
    /// List tracked namespaces
    List,
    /// Stop tracking namespaces
    Delete {
        /// Namespace names
        names: Vec<String>,
    },
}
