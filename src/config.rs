//! Configuration module for Spark

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::models::Platform;
use crate::paths;

/// Invalid configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Direct posting enabled for a platform without an API path
    #[error("{0} has no direct-post API; remove it from `direct_post`")]
    DirectPostUnavailable(Platform),
    /// Base URL is not http(s)
    #[error("api_base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the generation service
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Delay before returning fallback content, in milliseconds
    #[serde(default = "default_fallback_delay_ms")]
    pub fallback_delay_ms: u64,

    /// Platforms with a connected account
    #[serde(default)]
    pub connected: Vec<Platform>,

    /// Platforms enabled for direct posting
    #[serde(default = "default_direct_post")]
    pub direct_post: Vec<Platform>,

    /// Override for the history file location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_fallback_delay_ms() -> u64 {
    2000
}

fn default_direct_post() -> Vec<Platform> {
    Platform::all()
        .iter()
        .copied()
        .filter(|p| p.info().supports_direct_post)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            fallback_delay_ms: default_fallback_delay_ms(),
            connected: Vec::new(),
            direct_post: default_direct_post(),
            history_path: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Check values the catalog and HTTP client rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()));
        }
        if let Some(platform) = self
            .direct_post
            .iter()
            .find(|p| !p.info().supports_direct_post)
        {
            return Err(ConfigError::DirectPostUnavailable(*platform));
        }
        Ok(())
    }

    /// Fallback delay as a `Duration`
    pub const fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }

    /// Whether an account is connected for `platform`
    pub fn is_connected(&self, platform: Platform) -> bool {
        self.connected.contains(&platform)
    }

    /// Whether direct posting is enabled for `platform`
    pub fn allows_direct_post(&self, platform: Platform) -> bool {
        self.direct_post.contains(&platform)
    }

    /// Mark `platform` as connected
    pub fn connect(&mut self, platform: Platform) {
        if !self.is_connected(platform) {
            self.connected.push(platform);
        }
    }

    /// Mark `platform` as disconnected
    pub fn disconnect(&mut self, platform: Platform) {
        self.connected.retain(|p| *p != platform);
    }

    /// History file location (override or default)
    pub fn history_path(&self) -> Result<PathBuf> {
        match &self.history_path {
            Some(path) => Ok(path.clone()),
            None => paths::history_path(),
        }
    }
}
