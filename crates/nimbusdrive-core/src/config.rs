//! Configuration module for NimbusDrive.
//!
//! Typed configuration structs mapping to the YAML configuration file,
//! with loading, defaults, and a platform-appropriate default path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the notification layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

/// Notification dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Depth of the dispatch queue between the engine and the delivery pump.
    pub queue_capacity: usize,
    /// Whether the deprecated account-updated callback is still delivered
    /// alongside the generic event channel.
    pub legacy_account_callback: bool,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Path to the log file.
    pub file: PathBuf,
    /// Maximum size of a single log file (in MiB) before rotation.
    pub max_size_mb: u64,
    /// Maximum number of rotated log files to keep.
    pub max_files: u32,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/nimbusdrive/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("nimbusdrive")
            .join("config.yaml")
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            legacy_account_callback: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("nimbusdrive");
        Self {
            level: "info".to_string(),
            file: data_dir.join("nimbusdrive.log"),
            max_size_mb: 50,
            max_files: 5,
        }
    }
}
