//! Configuration system
//!
//! Provides centralized configuration management with:
//! - Environment variable support
//! - Config file loading (optional)
//! - Runtime defaults
//! - Validation and type safety

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Export configuration
    pub export: ExportConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default directory for the inactive-roster CSV when the command line
    /// does not name one.
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            export: ExportConfig {
                output_dir: PathBuf::from("."),
            },
            paths: PathsConfig {
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment, file, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("nutridash.toml"),
            PathBuf::from(".nutridash.toml"),
            dirs::config_dir()
                .map(|d| d.join("nutridash").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("NUTRIDASH_EXPORT_DIR") {
            self.export.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = env::var("NUTRIDASH_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(anyhow::anyhow!(
                    "Log format must be 'pretty' or 'json', got '{}'",
                    other
                ));
            }
        }

        match self.logging.output.as_str() {
            "console" | "file" | "both" => {}
            other => {
                return Err(anyhow::anyhow!(
                    "Log output must be 'console', 'file' or 'both', got '{}'",
                    other
                ));
            }
        }

        // The log directory only matters when file logging is on
        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}. Falling back to defaults.", e);
            Config::default()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "ERROR");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.export.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_env_override() {
        env::set_var("NUTRIDASH_EXPORT_DIR", "/tmp/rosters");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/rosters"));
        env::remove_var("NUTRIDASH_EXPORT_DIR");
    }

    #[test]
    fn test_validation_rejects_bad_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_output() {
        let mut config = Config::default();
        config.logging.output = "syslog".to_string();
        assert!(config.validate().is_err());
    }
}
