//! CLI module for push-relay
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command execution for `serve` and `send`

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel, SendArgs};

use anyhow::Context;

use crate::config::{ConfigLoader, settings::Settings};
use crate::logger::{LogLevelHandle, init_logger};

/// Load configuration files and apply CLI overrides
///
/// Returns the merged settings and the loader, which is kept for reloading
/// the log level at runtime.
///
/// # Errors
/// Returns error if configuration loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, Option<ConfigLoader>)> {
    let merger = ConfigurationMerger::from_cli(cli).context("Configuration error")?;
    let settings = merger
        .merge_cli_args(cli)
        .context("Configuration merge error")?;

    Ok((settings, merger.into_loader()))
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the logger settings are invalid or a global subscriber is
/// already installed
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    init_logger(logger_config).context("Logger initialization error")
}
