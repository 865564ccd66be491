//! Configuration management for CoreFF.
//!
//! Provides TOML-based configuration at the platform config path with
//! environment variable overrides. Provider credentials live here so the
//! host can hand them to the clients as plain arguments.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/coreff/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pappers registry API settings
    pub pappers: PappersConfig,
    /// Ellipro credentials
    pub ellipro: ElliproConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// See [`AppConfig::apply_env_overrides`] for the supported variables.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override settings from the environment.
    ///
    /// Supports the following environment variables:
    /// - `COREFF_PAPPERS_API_TOKEN`: Pappers API token
    /// - `COREFF_PAPPERS_BASE_URL`: Pappers API base URL
    /// - `COREFF_TIMEOUT_SECS`: request timeout in seconds
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("COREFF_PAPPERS_API_TOKEN") {
            self.pappers.api_token = token;
            tracing::debug!("Override pappers.api_token from env");
        }

        if let Ok(url) = std::env::var("COREFF_PAPPERS_BASE_URL") {
            tracing::debug!("Override pappers.base_url from env: {}", url);
            self.pappers.base_url = url;
        }

        if let Ok(val) = std::env::var("COREFF_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.pappers.timeout_secs = secs;
                tracing::debug!("Override pappers.timeout_secs from env: {}", secs);
            }
        }
    }

    /// Check values that would make every request fail.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.pappers.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pappers.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.pappers.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "pappers.base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to the default path.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses platform base directories: `~/.config/coreff/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("org", "coreff", "coreff").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Pappers registry API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PappersConfig {
    /// API token sent with every request
    pub api_token: String,
    /// API base URL, without trailing path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for PappersConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: "https://api.pappers.fr".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Ellipro account credentials.
///
/// Only read and written here; the host passes them to its Ellipro
/// connector. Nothing in this workspace sends them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElliproConfig {
    /// Contract number
    pub contract: String,
    /// Account user
    pub user: String,
    /// Account password
    pub password: String,
    /// Maximum number of hits per search
    pub max_hits: u32,
}

impl Default for ElliproConfig {
    fn default() -> Self {
        Self {
            contract: String::new(),
            user: String::new(),
            password: String::new(),
            max_hits: 10,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,coreff=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.pappers.base_url, "https://api.pappers.fr");
        assert_eq!(config.pappers.timeout_secs, 30);
        assert!(config.pappers.api_token.is_empty());
        assert_eq!(config.ellipro.max_hits, 10);
        assert_eq!(config.logging.filter, "info,coreff=debug");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[pappers]"));
        assert!(toml_str.contains("[ellipro]"));
        assert!(toml_str.contains("[logging]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.pappers.base_url, config.pappers.base_url);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.pappers.api_token = "secret-token".to_string();
        config.ellipro.contract = "12345".to_string();
        config.save_to(&config_path).expect("save config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.pappers.api_token, "secret-token");
        assert_eq!(loaded.ellipro.contract, "12345");
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let err = AppConfig::load_from(&tmp.path().join("absent.toml"))
            .expect_err("missing explicit file is an error");
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_load_from_rejects_zero_timeout() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[pappers]\ntimeout_secs = 0\n").expect("write config");

        let err = AppConfig::load_from(&config_path).expect_err("zero timeout is invalid");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("COREFF_PAPPERS_API_TOKEN", "env-token");
        std::env::set_var("COREFF_PAPPERS_BASE_URL", "http://127.0.0.1:9999");
        std::env::set_var("COREFF_TIMEOUT_SECS", "5");

        let mut config = AppConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.pappers.api_token, "env-token");
        assert_eq!(config.pappers.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.pappers.timeout_secs, 5);

        std::env::remove_var("COREFF_PAPPERS_API_TOKEN");
        std::env::remove_var("COREFF_PAPPERS_BASE_URL");
        std::env::remove_var("COREFF_TIMEOUT_SECS");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[pappers]
api_token = "abc"

[ellipro]
user = "jdoe"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.pappers.api_token, "abc");
        assert_eq!(config.ellipro.user, "jdoe");
        // These should be defaults
        assert_eq!(config.pappers.timeout_secs, 30);
        assert_eq!(config.ellipro.max_hits, 10);
    }
}
