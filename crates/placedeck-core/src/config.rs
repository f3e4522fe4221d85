//! Configuration for the panel and its asset contract.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assets::Assets;
use crate::router::DETAIL_ROUTE;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assets: Assets,

    #[serde(default)]
    pub panel: PanelConfig,
}

/// Panel behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Route prefix for detail navigation intents.
    #[serde(default = "default_detail_route")]
    pub detail_route: String,

    /// Panel share of the terminal width, in percent.
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,

    /// Open the panel on startup even before any results arrive.
    #[serde(default)]
    pub start_open: bool,
}

fn default_detail_route() -> String {
    DETAIL_ROUTE.into()
}

fn default_width_percent() -> u16 {
    40
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            detail_route: default_detail_route(),
            width_percent: default_width_percent(),
            start_open: false,
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
