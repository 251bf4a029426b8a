// SPDX-License-Identifier: MPL-2.0
//! This module handles the player configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[controls]` - Auto-hide behavior of the on-screen controls
//! - `[playback]` - Session defaults and readout cadence
//!
//! # Examples
//!
//! ```no_run
//! use preview_modal::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (config, _warning) = config::load();
//!
//! let muted = config.playback.start_muted.unwrap_or(false);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// On-screen controls settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Seconds of inactivity during playback before the controls hide.
    #[serde(
        default = "default_hide_delay_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_delay_secs: Option<u32>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hide_delay_secs: default_hide_delay_secs(),
        }
    }
}

/// Playback session settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Whether each new session starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_muted: Option<bool>,

    /// Minimum milliseconds between numeric time readout refreshes.
    #[serde(
        default = "default_readout_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub readout_interval_ms: Option<u32>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            start_muted: Some(false),
            readout_interval_ms: default_readout_interval_ms(),
        }
    }
}

/// Player configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub controls: ControlsConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

fn default_hide_delay_secs() -> Option<u32> {
    Some(DEFAULT_HIDE_DELAY_SECS)
}

fn default_readout_interval_ms() -> Option<u32> {
    Some(DEFAULT_READOUT_INTERVAL_MS)
}

fn config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    let warning = format!("using default settings: {err}");
                    log::warn!("failed to load {}: {err}", path.display());
                    return (Config::default(), Some(warning));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
