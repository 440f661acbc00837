//! Client configuration loading.
//!
//! Reads `~/.config/dealfinder/config.toml` with sensible defaults when the
//! file is absent, so a fresh install talks to the hosted endpoints without
//! any setup.

use crate::paths::DealfinderPaths;
use dealfinder_core::error::{DealfinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_API_BASE_URL: &str = "https://api.dealfinder.app";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for reaching the remote Catalog and User APIs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the catalog service
    #[serde(default = "default_base_url")]
    pub catalog_base_url: String,

    /// Base URL of the user service
    #[serde(default = "default_base_url")]
    pub user_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: default_base_url(),
            user_base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Loads the client configuration from disk.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates storage at the default path (~/.config/dealfinder/config.toml).
    pub fn new() -> Result<Self> {
        let path = DealfinderPaths::config_file()
            .map_err(|e| DealfinderError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates storage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, falling back to defaults when absent.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: Parsed file, or defaults if no file exists
    /// - `Err(_)`: The file exists but could not be read or parsed
    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let config = toml::from_str(&content)?;

        Ok(config)
    }
}
