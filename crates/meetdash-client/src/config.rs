//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/meetdash/config.toml` by default. Command-line flags override
//! the file; the file overrides built-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the meetdash client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the meeting service (default: the public origin).
    pub api_url: Option<String>,

    /// Debug mode.
    pub debug: bool,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Service/connection settings.
    #[serde(default)]
    pub service: ServiceSettings,
}

/// Display settings for the meeting view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum topic length (truncated with ellipsis).
    pub max_topic_length: Option<usize>,

    /// Whether to print join/host URLs under each meeting row.
    pub show_urls: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_topic_length: None,
            show_urls: true,
        }
    }
}

/// Service/connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { timeout: 10 }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetdash")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetdash")
    }
}
