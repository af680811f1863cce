//! Structured logging
//!
//! The terminal belongs to the UI, so log records go to a file:
//! ~/.local/share/fplcompanion/fplcompanion.log
//!
//! Priority: RUST_LOG env var > --debug flag > config level > "info".

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Location of the log file
pub fn log_path() -> Result<PathBuf> {
    let dir = dirs::data_local_dir()
        .context("Could not determine data directory")?
        .join("fplcompanion");
    Ok(dir.join("fplcompanion.log"))
}

/// Pick the filter directive
fn filter(debug_flag: bool, config_level: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    }
}

/// Initialise the logging subsystem. Returns the log file path.
pub fn init(debug_flag: bool, config_level: Option<&str>) -> Result<PathBuf> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter(debug_flag, config_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::debug!(
        app = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "Logging initialised"
    );
    Ok(path)
}
