//! `outreach` binary.
//!
//! Writes LinkedIn outreach messages for one recipient (`generate`) or for every row of an
//! input file (`batch`). Exits with status 1 on any error.

use clap::Parser;
use outreach::cli::{map_error, Cli, RunContext};
use outreach::config::ConfigLoader;
use outreach::error::OutreachError;
use outreach::logging::{init_logging, resolve_log_file_path, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Logging comes up before anything else can fail.
    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!(
        command = outreach::cli::command_name(&cli.command),
        workspace = %cli.workspace.display(),
        "outreach starting"
    );

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => exit_with("Error loading configuration", &e),
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with("Command failed", &e),
    }
}

fn exit_with(context: &str, e: &OutreachError) -> ! {
    error!("{}: {}", context, e);
    eprintln!("{}", map_error(e));
    process::exit(1);
}

/// Logging settings from the `[logging]` config section with flags applied on top.
///
/// `--quiet` turns logging off; `--verbose` raises the level to debug and mirrors a file-only
/// log to stderr. `--log-level`, `--log-format` and `--log-output` replace their fields last.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
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

    let output_uses_file = config.output == "file" || config.output == "file+stderr";
    if config.enabled && output_uses_file {
        let resolved = resolve_log_file_path(
            cli.log_file.clone(),
            config.file.clone(),
            Some(cli.workspace.as_path()),
        );
        if let Ok(path) = resolved {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
