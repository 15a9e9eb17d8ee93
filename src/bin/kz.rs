//! kz CLI Binary
//!
//! Switch kubeconfig context and namespace by partial name.

use clap::Parser;
use kz::cli::{format_failure, format_success, map_error, Cli, RunContext};
use kz::config::ConfigLoader;
use kz::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("kz starting");

    let context = match RunContext::new(cli.kubeconfig.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => fail(&e),
    };

    match context.execute(cli.command.as_ref(), &cli.args) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", format_success(&output, std::io::stdout().is_terminal()));
        }
        Err(e) => fail(&e),
    }
}

fn fail(e: &kz::error::KzError) -> ! {
    error!("Command failed: {}", e);
    eprintln!("{}", format_failure(&map_error(e), std::io::stderr().is_terminal()));
    process::exit(1);
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
/// Any logging flag turns logging on.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = ConfigLoader::load(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.enabled = true;
        config.format = format.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.enabled = true;
        config.file = Some(file.clone());
        config.output = "file".to_string();
    }
    if let Some(ref output) = cli.log_output {
        config.enabled = true;
        config.output = output.clone();
    }

    config
}
