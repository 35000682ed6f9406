//! Configuration loading and validation for pcparts.
//!
//! Loads configuration from `~/.pcparts/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Overrides `store.path`.
pub const ENV_DB_PATH: &str = "PCPARTS_DB";
/// Overrides `gateway.port`.
pub const ENV_PORT: &str = "PCPARTS_PORT";
/// Overrides `display.currency`.
pub const ENV_CURRENCY: &str = "PCPARTS_CURRENCY";

/// The root configuration structure.
///
/// Maps directly to `~/.pcparts/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backing part store
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP gateway
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// How prices are rendered
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file. A leading `~/` expands to the home directory.
    #[serde(default = "default_store_path")]
    pub path: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_store_path() -> String {
    AppConfig::config_dir()
        .join("pc_parts.db")
        .to_string_lossy()
        .into_owned()
}
fn default_max_connections() -> u32 {
    1
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl StoreConfig {
    /// The database path with `~/` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        match self.path.strip_prefix("~/") {
            Some(rest) => dirs_home().join(rest),
            None => PathBuf::from(&self.path),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8090
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Label printed before every amount, e.g. `NT$ 12,990`.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "NT$".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.store.path = path;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("{ENV_PORT} must be a port number, got '{port}'"))
            })?;
        }

        if let Some(currency) = lookup(ENV_CURRENCY) {
            self.display.currency = currency;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".pcparts")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.trim().is_empty() {
            return Err(ConfigError::ValidationError("store.path must not be empty".into()));
        }

        if self.store.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "store.max_connections must be at least 1".into(),
            ));
        }

        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError("gateway.port must not be 0".into()));
        }

        if self.display.currency.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "display.currency must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
