//! ClearThink Configuration Module
//!
//! Where the analysis service lives and how long to wait for it.
//! Config is stored in `~/.config/clearthink/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Command-line flags (`--api-url`, `--timeout`)
//! 2. Environment variable (`CLEARTHINK_API_URL`)
//! 3. Config file (`~/.config/clearthink/config.toml`)
//! 4. Defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClearThinkError, Result};

/// Default service URL, matching the service's standard local port.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default request timeout. Six sequential agents take a while.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClearThinkConfig {
    /// Base URL of the analysis service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClearThinkConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClearThinkConfig {
    /// Get the config directory path
    ///
    /// Returns `~/.config/clearthink/` on Unix, `%APPDATA%/clearthink/`
    /// on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clearthink")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from the standard path
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load() -> Result<Self> {
        Self::load_path(&Self::config_path())
    }

    /// Load configuration from an explicit path
    pub fn load_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ClearThinkError::Config {
            reason: format!("Failed to read config file: {}", e),
        })?;

        toml::from_str(&content).map_err(|e| ClearThinkError::Config {
            reason: format!("Failed to parse config file: {}", e),
        })
    }

    /// Merge with environment variables
    ///
    /// `CLEARTHINK_API_URL` takes precedence over the file value; an empty
    /// variable is ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("CLEARTHINK_API_URL") {
            if !url.is_empty() {
                self.api_url = url;
            }
        }

        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
