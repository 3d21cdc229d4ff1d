//! mig - issue tracker transfer tool
//!
//! Moves the issues behind one version filter from a source tracker to a
//! target tracker over their REST APIs: subjects, descriptions, dates,
//! hierarchy, attachments, and journal notes, with classification fields
//! translated by name.
//!
//! # Examples
//!
//! ```bash
//! # Write a starter configuration to ./.mig/config.toml
//! mig init
//!
//! # Validate the configuration without touching either tracker
//! mig check
//!
//! # Run the transfer
//! mig run
//! ```

mod cli;
mod commands;
mod error;
mod logger;


use crate::cli::Cli;
use crate::commands::Commands;
use crate::error::{CliError, Result as CliErrorResult};

use mig_client::resolve_endpoint;
use mig_config::Config;
use mig_engine::TransferEngine;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_transfer(cli.config.as_deref()).await,
        Commands::Check => check_config(cli.config.as_deref()),
        Commands::Init => init_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load, validate, transfer.
async fn run_transfer(config_path: Option<&Path>) -> CliErrorResult<()> {
    let config = load_config(config_path)?;
    config.validate()?;

    let log_file = log_file_path(&config)?;
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("Starting mig v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let report = TransferEngine::new(&config)?.run().await?;

    println!(
        "transferred {} issues ({} skipped, {} parent links, {} attachments, {} notes)",
        report.created, report.skipped, report.linked, report.attachments, report.notes
    );

    Ok(())
}

/// Validate the configuration and show where the target endpoint resolves,
/// without a single network call.
fn check_config(config_path: Option<&Path>) -> CliErrorResult<()> {
    let config = load_config(config_path)?;
    config.validate()?;

    logger::initialize(config.logging.level, None, config.logging.colored)?;
    config.log_summary();

    let endpoint = resolve_endpoint(&config.target.endpoint, config.target.secure);
    println!(
        "configuration OK; target endpoint resolves to {}",
        endpoint.base_url()
    );

    Ok(())
}

/// Write the starter config, refusing to clobber an existing one.
fn init_config() -> CliErrorResult<()> {
    let config_dir = Config::config_dir()?;
    std::fs::create_dir_all(&config_dir).map_err(|e| CliError::Io {
        path: config_dir.display().to_string(),
        source: e,
    })?;

    let config_path = config_dir.join("config.toml");
    if config_path.exists() {
        return Err(CliError::Exists {
            path: config_path.display().to_string(),
        });
    }

    std::fs::write(&config_path, STARTER_CONFIG).map_err(|e| CliError::Io {
        path: config_path.display().to_string(),
        source: e,
    })?;

    println!("wrote {}", config_path.display());
    Ok(())
}

fn load_config(path: Option<&Path>) -> CliErrorResult<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    Ok(config)
}

/// Full log file path when file logging is configured, creating the log
/// directory on the way.
fn log_file_path(config: &Config) -> CliErrorResult<Option<PathBuf>> {
    let Some(ref filename) = config.logging.file else {
        return Ok(None);
    };

    let log_dir = Config::config_dir()?.join(&config.logging.dir);
    std::fs::create_dir_all(&log_dir).map_err(|e| CliError::Io {
        path: log_dir.display().to_string(),
        source: e,
    })?;

    Ok(Some(log_dir.join(filename)))
}

const STARTER_CONFIG: &str = r#"# mig configuration
#
# Every value here can be overridden by a MIG_* environment variable
# (MIG_SOURCE_URL, MIG_TARGET_API_KEY, MIG_LOG_LEVEL, ...).

[source]
# Absolute URL of the source tracker
url = "https://old-tracker.example.com"
api_key = ""
# Only issues of this fixed version are transferred
version_id = 1

[target]
# Host of the target tracker: bare host, host:port, or a full URL
endpoint = "localhost:3000"
# Assume https when the endpoint names no scheme
secure = false
api_key = ""
project_id = 1
version_id = 1
# Existing target user every transferred issue is assigned to
fallback_assignee_id = 1

[transfer]
# "continue" skips an issue that could not be created; "abort" stops the run
on_item_error = "continue"

[http]
timeout_secs = 30
connect_timeout_secs = 10

[logging]
level = "info"
colored = true
# Uncomment to also write a log file under <config dir>/log/
# file = "mig.log"
# dir = "log"
"#;
