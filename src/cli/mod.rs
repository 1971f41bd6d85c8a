//! CLI module for catalog-rs
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;
use crate::logger::{LogLevelHandle, init_logger};

/// Load the file configuration selected by `--config` and `--env`
///
/// # Errors
/// Returns error if configuration loading or validation fails
pub fn load_config(cli: &Cli) -> anyhow::Result<ConfigurationMerger> {
    ConfigurationMerger::from_cli(cli).context("Configuration error")
}

/// Initialize the global logger from the `[logger]` settings
///
/// # Errors
/// Returns error if the logger settings are invalid or a subscriber is already set
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    init_logger(logger_config).context("Logger initialization error")
}

/// Switch the running logger to the level chosen on the command line
///
/// The logger starts with the file level so configuration loading is logged;
/// `--verbose`, `--quiet` and `serve --log-level` take effect here.
///
/// # Errors
/// Returns error if the merged level is not a valid filter
pub fn apply_log_level(
    handle: &LogLevelHandle,
    file_settings: &Settings,
    merged: &Settings,
) -> anyhow::Result<()> {
    let (from, to) = (&file_settings.logger.level, &merged.logger.level);
    if from == to {
        return Ok(());
    }

    handle.set_level(to).context("Log level override error")?;
    tracing::info!(from = %from, to = %to, "Log level overridden from command line");
    Ok(())
}
