//! Configuration settings management
//!
//! This module handles loading configuration from multiple sources,
//! validation, and persistence.

use crate::blob::ConnectionOptions;
use crate::error::{BlobputError, Result};
use crate::utils::network::NetworkConfig;
use crate::utils::sanitizer::redact_sas;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debug: bool,
    pub account: String,
    pub container: String,
    pub sas_token: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            account: String::new(),
            container: String::new(),
            sas_token: String::new(),
            connect_timeout_secs: 30,
            request_timeout_secs: 300,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that everything an upload needs is present
    pub fn validate(&self) -> Result<()> {
        if self.account.is_empty() {
            return Err(BlobputError::config(
                "Storage account is required (--account, AZURE_STORAGE_ACCOUNT or config file)",
            ));
        }

        if self.container.is_empty() {
            return Err(BlobputError::config(
                "Container is required (--container, AZURE_STORAGE_CONTAINER or config file)",
            ));
        }

        if self.sas_token.is_empty() {
            return Err(BlobputError::config(
                "SAS token is required (--sas, AZURE_STORAGE_SAS_TOKEN or config file)",
            ));
        }

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        // Use XDG Base Directory specification on Linux and macOS
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            use std::env;
            let config_dir = if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
                PathBuf::from(xdg_config_home)
            } else {
                let home_dir = env::var("HOME")
                    .map_err(|_| BlobputError::config("HOME environment variable not set"))?;
                PathBuf::from(home_dir).join(".config")
            };
            Ok(config_dir.join("blobput").join("blobput.toml"))
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            let config_dir = dirs::config_dir()
                .ok_or_else(|| BlobputError::config("Unable to determine config directory"))?;
            Ok(config_dir.join("blobput").join("blobput.toml"))
        }
    }

    pub async fn load() -> Result<Self> {
        load_config().await
    }

    pub async fn save(&self) -> Result<()> {
        save_config(self).await
    }

    /// Connection options for the uploader
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions::new(&self.account, &self.container, &self.sas_token)
    }

    pub fn network_config(&self) -> NetworkConfig {
        NetworkConfig {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..NetworkConfig::default()
        }
    }

    /// Set a single value by its config-file key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "debug" => self.debug = parse_bool(value),
            "account" => self.account = value.to_string(),
            "container" => self.container = value.to_string(),
            "sas_token" => self.sas_token = value.to_string(),
            "connect_timeout_secs" => self.connect_timeout_secs = parse_secs(key, value)?,
            "request_timeout_secs" => self.request_timeout_secs = parse_secs(key, value)?,
            _ => {
                return Err(BlobputError::invalid_argument(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Copy of this config that is safe to print
    pub fn redacted(&self) -> Self {
        Self {
            sas_token: redact_sas(&self.sas_token),
            ..self.clone()
        }
    }
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        BlobputError::invalid_argument(format!("{} must be a number of seconds, got '{}'", key, value))
    })
}

/// Load configuration from multiple sources with priority order:
/// 1. Command-line flags (applied by the caller)
/// 2. Environment variables
/// 3. Configuration file
/// 4. Default values
pub async fn load_config() -> Result<Config> {
    let config_path = Config::get_config_path()?;
    load_config_from(&config_path).await
}

/// Load configuration from a specific file (if it exists) plus the environment
pub async fn load_config_from(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        load_from_file(path).await?
    } else {
        Config::default()
    };

    load_from_env(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

pub(crate) async fn load_from_file(path: &Path) -> Result<Config> {
    let contents = tokio::fs::read_to_string(path).await?;

    // Try to parse as TOML first, then JSON as fallback
    if let Ok(config) = toml::from_str::<Config>(&contents) {
        return Ok(config);
    }

    let config = serde_json::from_str::<Config>(&contents)?;
    Ok(config)
}

fn load_from_env<F>(config: &mut Config, var: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = var("BLOBPUT_DEBUG") {
        config.debug = parse_bool(&value);
    }

    if let Some(value) = var("AZURE_STORAGE_ACCOUNT") {
        config.account = value;
    }

    if let Some(value) = var("AZURE_STORAGE_CONTAINER") {
        config.container = value;
    }

    if let Some(value) = var("AZURE_STORAGE_SAS_TOKEN") {
        config.sas_token = value;
    }

    if let Some(value) = var("BLOBPUT_CONNECT_TIMEOUT") {
        if let Ok(seconds) = value.parse::<u64>() {
            config.connect_timeout_secs = seconds;
        }
    }

    if let Some(value) = var("BLOBPUT_REQUEST_TIMEOUT") {
        if let Ok(seconds) = value.parse::<u64>() {
            config.request_timeout_secs = seconds;
        }
    }
}

/// Set one key in the config file at `path`, creating the file if needed
///
/// Only file values are persisted, not environment or flag overrides.
pub async fn set_config_value(path: &Path, key: &str, value: &str) -> Result<Config> {
    let mut config = if path.exists() {
        load_from_file(path).await?
    } else {
        Config::default()
    };

    config.set(key, value)?;
    save_config_to(&config, path).await?;

    Ok(config)
}

pub async fn save_config(config: &Config) -> Result<()> {
    let config_path = Config::get_config_path()?;
    save_config_to(config, &config_path).await
}

pub async fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(config)?;
    tokio::fs::write(path, contents).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_config() -> Config {
        Config {
            account: "acct".to_string(),
            container: "files".to_string(),
            sas_token: "?sv=1&sig=secret".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_validate_requires_connection_fields() {
        assert!(full_config().validate().is_ok());

        let mut config = full_config();
        config.sas_token.clear();
        assert!(matches!(config.validate(), Err(BlobputError::ConfigError(_))));

        let mut config = full_config();
        config.account.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("AZURE_STORAGE_ACCOUNT", "envacct"),
            ("AZURE_STORAGE_SAS_TOKEN", "?sig=env"),
            ("BLOBPUT_DEBUG", "1"),
            ("BLOBPUT_REQUEST_TIMEOUT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = full_config();
        load_from_env(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.account, "envacct");
        assert_eq!(config.container, "files");
        assert_eq!(config.sas_token, "?sig=env");
        assert!(config.debug);
        assert_eq!(config.request_timeout_secs, 300);
    }

    #[test]
    fn test_set_known_and_unknown_keys() {
        let mut config = Config::new();
        config.set("account", "acct").unwrap();
        config.set("connect_timeout_secs", "5").unwrap();
        assert_eq!(config.account, "acct");
        assert_eq!(config.network_config().connect_timeout, Duration::from_secs(5));

        assert!(config.set("connect_timeout_secs", "soon").is_err());
        assert!(matches!(
            config.set("colour", "blue"),
            Err(BlobputError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_redacted_hides_signature() {
        let redacted = full_config().redacted();
        assert_eq!(redacted.sas_token, "?sv=1&sig=REDACTED");
        assert_eq!(redacted.account, "acct");
    }

    #[test]
    fn test_connection_options_from_config() {
        let options = full_config().connection_options();
        assert_eq!(options, ConnectionOptions::new("acct", "files", "?sv=1&sig=secret"));
    }

    #[tokio::test]
    async fn test_save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("blobput.toml");

        save_config_to(&full_config(), &path).await.unwrap();
        let loaded = load_from_file(&path).await.unwrap();
        assert_eq!(loaded, full_config());
    }

    #[tokio::test]
    async fn test_load_json_fallback_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blobput.toml");
        tokio::fs::write(&path, r#"{"account": "jsonacct", "container": "c"}"#)
            .await
            .unwrap();

        let loaded = load_from_file(&path).await.unwrap();
        assert_eq!(loaded.account, "jsonacct");
        assert_eq!(loaded.container, "c");
        assert_eq!(loaded.connect_timeout_secs, 30);
    }

    #[tokio::test]
    async fn test_set_config_value_on_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blobput.toml");
        tokio::fs::write(&path, r#"{"account": "a", "container": "files"}"#)
            .await
            .unwrap();

        let updated = set_config_value(&path, "sas_token", "?sig=x").await.unwrap();
        assert_eq!(updated.account, "a");
        assert_eq!(updated.sas_token, "?sig=x");

        // The file is rewritten as TOML and keeps the earlier values
        let reloaded = load_from_file(&path).await.unwrap();
        assert_eq!(reloaded, updated);
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(toml::from_str::<Config>(&contents).is_ok());
    }

    #[tokio::test]
    async fn test_set_config_value_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new").join("blobput.toml");

        set_config_value(&path, "container", "files").await.unwrap();
        let loaded = load_from_file(&path).await.unwrap();
        assert_eq!(loaded.container, "files");
        assert!(set_config_value(&path, "nope", "x").await.is_err());
    }
}
