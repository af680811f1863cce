//! Configuration management for fplcompanion
//!
//! Handles loading, saving, and default configuration values.
//! Config file location: ~/.config/fplcompanion/config.toml

use crate::types::AppearanceMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearancePreference,
    pub animations: AnimationOptions,
    pub logging: LoggingOptions,
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("fplcompanion");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Write config to `path`, creating the directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }
}

/// Which appearance to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearancePreference {
    /// Follow the host terminal
    #[default]
    System,
    Light,
    Dark,
}

impl AppearancePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppearancePreference::System => "System",
            AppearancePreference::Light => "Light",
            AppearancePreference::Dark => "Dark",
        }
    }

    /// Forced mode, if any
    pub fn forced(&self) -> Option<AppearanceMode> {
        match self {
            AppearancePreference::System => None,
            AppearancePreference::Light => Some(AppearanceMode::Light),
            AppearancePreference::Dark => Some(AppearanceMode::Dark),
        }
    }
}

/// Animation switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    pub enabled: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Filter directive, e.g. "debug" or "fplcompanion=trace"
    pub level: Option<String>,
}
