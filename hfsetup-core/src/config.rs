//! Configuration loading and management
//!
//! Two sources feed a setup run:
//! - The process environment (`HF_TOKEN`, `HF_DATASET_NAME`, `HF_ENDPOINT`),
//!   captured once in [`SetupEnv`].
//! - An optional tool config at `$XDG_CONFIG_HOME/hfsetup/config.toml`
//!   (~/.config/hfsetup/config.toml) for Hub and logging settings.
//!
//! Logs go to `$XDG_STATE_HOME/hfsetup/` (~/.local/state/hfsetup/).

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable holding the Hub access token
pub const TOKEN_VAR: &str = "HF_TOKEN";

/// Environment variable holding the dataset name
pub const DATASET_NAME_VAR: &str = "HF_DATASET_NAME";

/// Environment variable overriding the Hub endpoint
pub const ENDPOINT_VAR: &str = "HF_ENDPOINT";

/// Dataset name used when `HF_DATASET_NAME` is unset
pub const DEFAULT_DATASET_NAME: &str = "teracharacter-database";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Values read from the process environment for one setup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupEnv {
    /// Hub access token, `None` when unset
    pub token: Option<String>,
    /// Dataset name, falls back to [`DEFAULT_DATASET_NAME`]
    pub dataset_name: String,
}

impl SetupEnv {
    /// Capture the current process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            token: lookup(TOKEN_VAR),
            dataset_name: lookup(DATASET_NAME_VAR)
                .unwrap_or_else(|| DEFAULT_DATASET_NAME.to_string()),
        }
    }

    /// Token usable for authentication. An empty token counts as missing.
    pub fn usable_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Hugging Face Hub settings
    #[serde(default)]
    pub hub: HubConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hugging Face Hub settings
#[derive(Debug, Deserialize, Clone)]
pub struct HubConfig {
    /// Hub base URL (overridden by `HF_ENDPOINT`)
    #[serde(default = "default_hub_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_hub_timeout")]
    pub timeout_secs: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: default_hub_endpoint(),
            timeout_secs: default_hub_timeout(),
        }
    }
}

impl HubConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("hub.endpoint must not be empty".to_string()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::Config(format!(
                "hub.endpoint must be an http(s) URL, got {:?}",
                self.endpoint
            )));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "hub.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_hub_endpoint() -> String {
    "https://huggingface.co".to_string()
}

fn default_hub_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path, then apply env overrides
    ///
    /// Hub settings are not validated here; the Hub client checks them
    /// when remote work is actually requested.
    pub fn load() -> Result<Self> {
        Self::load_at(&Self::config_path(), |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], but never fails
    ///
    /// An unreadable or unparsable config file falls back to defaults (env
    /// overrides still apply). The load error is returned for reporting.
    pub fn load_or_default() -> (Self, Option<Error>) {
        Self::load_at_or_default(&Self::config_path(), |key| std::env::var(key).ok())
    }

    fn load_at<F>(config_path: &PathBuf, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if config_path.exists() {
            Self::load_from(config_path)?
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Config::default()
        };

        config.apply_env_overrides(lookup);
        Ok(config)
    }

    fn load_at_or_default<F>(config_path: &PathBuf, lookup: F) -> (Self, Option<Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::load_at(config_path, &lookup) {
            Ok(config) => (config, None),
            Err(e) => {
                // Fall back to defaults but keep the env overrides
                let mut config = Config::default();
                config.apply_env_overrides(&lookup);
                (config, Some(e))
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Apply environment overrides on top of file values
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|e| !e.is_empty()) {
            self.hub.endpoint = endpoint;
        }
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/hfsetup/config.toml` (~/.config/hfsetup/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("hfsetup").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/hfsetup/` (~/.local/state/hfsetup/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("hfsetup")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/hfsetup/hfsetup.log` (~/.local/state/hfsetup/hfsetup.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("hfsetup.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.hub.endpoint, "https://huggingface.co");
        assert_eq!(config.hub.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
        assert!(config.hub.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[hub]
endpoint = "https://hub.example.com"
timeout_secs = 10

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.hub.endpoint, "https://hub.example.com");
        assert_eq!(config.hub.timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_load_from_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[hub\nendpoint = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_hub_config_validation() {
        let config = HubConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = HubConfig {
            endpoint: "huggingface.co".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = HubConfig {
            endpoint: "http://127.0.0.1:8080".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_env_override() {
        let mut config = Config::default();
        config.apply_env_overrides(lookup(&[(ENDPOINT_VAR, "http://localhost:9999")]));
        assert_eq!(config.hub.endpoint, "http://localhost:9999");

        // Empty values leave the configured endpoint alone
        let mut config = Config::default();
        config.apply_env_overrides(lookup(&[(ENDPOINT_VAR, "")]));
        assert_eq!(config.hub.endpoint, "https://huggingface.co");
    }

    #[test]
    fn test_load_keeps_invalid_hub_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        // Validation is left to the Hub client, so loading succeeds
        let config = Config::load_at(&path, lookup(&[(ENDPOINT_VAR, "huggingface.co")])).unwrap();
        assert_eq!(config.hub.endpoint, "huggingface.co");
        assert!(config.hub.validate().is_err());
    }

    #[test]
    fn test_load_or_default_recovers_from_bad_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[hub\nendpoint = ").unwrap();

        let (config, err) = Config::load_at_or_default(
            &path,
            lookup(&[(ENDPOINT_VAR, "http://localhost:9999")]),
        );

        assert!(matches!(err, Some(Error::Config(_))));
        assert_eq!(config.hub.endpoint, "http://localhost:9999");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let (config, err) =
            Config::load_at_or_default(&dir.path().join("missing.toml"), lookup(&[]));
        assert!(err.is_none());
        assert_eq!(config.hub.endpoint, "https://huggingface.co");
    }

    #[test]
    fn test_setup_env_defaults() {
        let env = SetupEnv::from_lookup(lookup(&[]));
        assert_eq!(env.token, None);
        assert_eq!(env.dataset_name, DEFAULT_DATASET_NAME);
        assert_eq!(env.usable_token(), None);
    }

    #[test]
    fn test_setup_env_reads_variables() {
        let env = SetupEnv::from_lookup(lookup(&[
            (TOKEN_VAR, "hf_abc"),
            (DATASET_NAME_VAR, "my-characters"),
        ]));
        assert_eq!(env.token.as_deref(), Some("hf_abc"));
        assert_eq!(env.dataset_name, "my-characters");
        assert_eq!(env.usable_token(), Some("hf_abc"));
    }

    #[test]
    fn test_empty_token_is_not_usable() {
        let env = SetupEnv::from_lookup(lookup(&[(TOKEN_VAR, "")]));
        assert_eq!(env.token.as_deref(), Some(""));
        assert_eq!(env.usable_token(), None);
    }

    #[test]
    fn test_log_path() {
        assert!(Config::log_path().ends_with("hfsetup/hfsetup.log"));
    }
}
