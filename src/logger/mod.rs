//! Logger Module
//!
//! A logging system based on `tracing-subscriber` with support for:
//! - Console output with color control
//! - File output in Full, Compact or JSON format
//! - Changing the level filter at runtime through [`LogLevelHandle`]

pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::*;
pub use error::LoggerError;

use std::fs::{File, OpenOptions};
use std::io::IsTerminal;
use std::sync::Mutex;

use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, reload};

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;

type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Fully assembled subscriber: reloadable filter, then the output layers.
pub(crate) type LoggerSubscriber = Layered<Vec<BoxedLayer>, FilteredRegistry>;

/// Handle for changing the active filter after the logger is installed.
#[derive(Clone)]
pub struct LogLevelHandle {
    inner: reload::Handle<EnvFilter, Registry>,
}

impl LogLevelHandle {
    /// Replace the active filter.
    ///
    /// Accepts a plain level (`debug`) or full EnvFilter directives
    /// (`info,catalog_rs::repositories=trace`).
    pub fn set_level(&self, level: &str) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| LoggerError::config(format!("Invalid filter '{level}': {e}")))?;

        self.inner
            .reload(filter)
            .map_err(|e| LoggerError::init(e.to_string()))
    }

    /// The active filter rendered as EnvFilter directives.
    pub fn current_level(&self) -> Option<String> {
        self.inner.with_current(|filter| filter.to_string()).ok()
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails when the configuration is invalid, the log file cannot be opened,
/// or a global subscriber is already set.
pub fn init_logger(config: LoggerConfig) -> Result<LogLevelHandle, LoggerError> {
    let (subscriber, handle) = build_subscriber(&config)?;

    subscriber
        .try_init()
        .map_err(|e| LoggerError::init(e.to_string()))?;

    Ok(handle)
}

/// Assemble the subscriber without installing it.
pub(crate) fn build_subscriber(
    config: &LoggerConfig,
) -> Result<(LoggerSubscriber, LogLevelHandle), LoggerError> {
    config.validate()?;

    let filter = config.env_filter()?;
    let (filter_layer, reload_handle) = reload::Layer::new(filter);

    // File layer goes first so console ANSI settings do not leak into span fields on disk.
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    let subscriber = tracing_subscriber::registry()
        .with(filter_layer)
        .with(layers);

    Ok((
        subscriber,
        LogLevelHandle {
            inner: reload_handle,
        },
    ))
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = Mutex::new(open_log_file(config)?);
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => layer.boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Json => layer.json().boxed(),
    })
}

fn open_log_file(config: &FileConfig) -> Result<File, LoggerError> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(config.append)
        .truncate(!config.append)
        .open(&config.path)?;

    Ok(file)
}
