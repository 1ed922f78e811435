//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/trendlens/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/trendlens/` (~/.config/trendlens/)
//! - State/Logs: `$XDG_STATE_HOME/trendlens/` (~/.local/state/trendlens/)
//!
//! A missing config file is not an error: every field has a default, and
//! the snapshot source can always be overridden on the command line.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Snapshot data source
    #[serde(default)]
    pub data: DataConfig,

    /// UI timing knobs
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the config file, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("trendlens/config.toml")
    }

    /// Directory for logs and other mutable state.
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("trendlens")
    }
}

/// Snapshot source configuration
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Path or URL of the snapshot document
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

fn default_source() -> String {
    "trendData.json".to_string()
}

/// UI timing configuration
///
/// Both delays are the artificial ones the dashboard always had: the
/// refresh busy indicator and the pause before insight text appears.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UiConfig {
    /// How long the refresh control stays busy before reloading
    #[serde(default = "default_refresh_busy_ms")]
    pub refresh_busy_ms: u64,

    /// Delay before the detail overlay reveals its insight text
    #[serde(default = "default_insight_delay_ms")]
    pub insight_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_busy_ms: default_refresh_busy_ms(),
            insight_delay_ms: default_insight_delay_ms(),
        }
    }
}

fn default_refresh_busy_ms() -> u64 {
    1000
}

fn default_insight_delay_ms() -> u64 {
    1500
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
