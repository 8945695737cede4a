//! rpmgen CLI Binary
//!
//! Loads the configuration once, installs logging from it and runs the
//! requested command.

use clap::Parser;
use rpmgen::cli::{map_error, Cli, RunContext};
use rpmgen::config::ConfigLoader;
use rpmgen::error::ApiError;
use rpmgen::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let loaded = ConfigLoader::resolve(&cli.workspace, cli.config.as_deref());

    // A broken configuration is reported after logging is up, with defaults.
    let file_logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    if let Err(e) = init_logging(Some(&apply_log_flags(&cli, file_logging))) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("rpmgen starting");

    let config = loaded.unwrap_or_else(|e| fail("Error loading configuration", e));
    let context = RunContext::with_config(cli.workspace.clone(), config);
    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => fail("Command failed", e),
    }
}

fn fail(context: &str, e: ApiError) -> ! {
    error!("{}: {}", context, e);
    eprintln!("{}", map_error(&e));
    process::exit(1)
}

/// Command-line log flags layered over the configured logging.
fn apply_log_flags(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }
    config
}
