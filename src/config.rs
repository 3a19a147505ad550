//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::store::DEFAULT_SLOT_KEY;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Lead store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_slot")]
    pub slot: String,

    #[serde(default = "default_persist")]
    pub persist: bool,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("leadboard").to_string_lossy().to_string())
        .unwrap_or_else(|| "./leadboard_data".to_string())
}

fn default_slot() -> String {
    DEFAULT_SLOT_KEY.to_string()
}

fn default_persist() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            slot: default_slot(),
            persist: default_persist(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("leadboard").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable source
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Store overrides
        if let Some(data_dir) = var("LEADBOARD_DATA_DIR") {
            self.store.data_dir = data_dir;
        }
        if let Some(slot) = var("LEADBOARD_SLOT") {
            self.store.slot = slot;
        }
        if let Some(persist) = var("LEADBOARD_PERSIST") {
            match persist.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.store.persist = true,
                "0" | "false" | "no" | "off" => self.store.persist = false,
                other => tracing::warn!("Ignoring LEADBOARD_PERSIST={:?}", other),
            }
        }

        // Logging overrides
        if let Some(level) = var("LEADBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("LEADBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Leadboard Configuration
#
# Environment variables override these settings:
# - LEADBOARD_DATA_DIR
# - LEADBOARD_SLOT
# - LEADBOARD_PERSIST
# - LEADBOARD_LOG_LEVEL
# - LEADBOARD_LOG_FORMAT

[store]
# Directory holding the lead slot
data_dir = "~/.local/share/leadboard"

# Slot name; leads are written to <data_dir>/<slot>.json
slot = "leads"

# Mirror every change to disk (false keeps leads in memory only)
persist = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.store.slot, "leads");
        assert!(config.store.persist);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.store.data_dir, "~/.local/share/leadboard");
        assert_eq!(config.store.slot, "leads");
        assert!(config.store.persist);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse("[store]\npersist = false\n").unwrap();
        assert!(!config.store.persist);
        assert_eq!(config.store.slot, "leads");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("LEADBOARD_DATA_DIR", "/tmp/leads"),
            ("LEADBOARD_SLOT", "crm"),
            ("LEADBOARD_PERSIST", "off"),
            ("LEADBOARD_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.data_dir, "/tmp/leads");
        assert_eq!(config.store.slot, "crm");
        assert!(!config.store.persist);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_persist_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "LEADBOARD_PERSIST").then(|| "maybe".to_string()));
        assert!(config.store.persist);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/leadboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");

        std::fs::write(&path, "[logging\n").unwrap();
        assert!(matches!(
            Config::load(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
