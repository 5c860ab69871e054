//! Configuration file.
//!
//! Stored as TOML at `<config dir>/vidbot/config.toml`. Every field has a
//! default, so a missing or partial file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::player::EngineConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "VIDBOT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub logging: LoggingConfig,
}

/// `[player]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Delay between activation and the first video load
    pub activation_delay_ms: u64,
    /// Viewport widths below this are treated as mobile
    pub mobile_breakpoint_px: u32,
    /// Viewport width reported by the simulated device
    pub viewport_width: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            activation_delay_ms: 200,
            mobile_breakpoint_px: 800,
            viewport_width: 1280,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("vidbot").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            activation_delay: Duration::from_millis(self.player.activation_delay_ms),
            mobile_breakpoint: self.player.mobile_breakpoint_px,
        }
    }
}
