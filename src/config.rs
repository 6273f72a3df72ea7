//! Configuration file handling.
//!
//! This module provides loading and saving of vulntrack configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/vulntrack/config.toml`
//! - macOS: `~/Library/Application Support/vulntrack/config.toml`
//! - Windows: `%APPDATA%\vulntrack\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! cache_ttl_secs = 3600
//! request_timeout_secs = 10
//! osv_api_url = "https://api.osv.dev/v1/query"
//! default_format = "table"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::checker::OSV_QUERY_URL;

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use vulntrack::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Cache TTL: {:?}", config.cache_ttl());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long a vulnerability lookup stays cached, in seconds.
    ///
    /// Default: 3600 (one hour)
    pub cache_ttl_secs: u64,

    /// Upper bound on a single vulnerability query, in seconds.
    ///
    /// Default: 10
    pub request_timeout_secs: u64,

    /// OSV query endpoint.
    ///
    /// Default: `https://api.osv.dev/v1/query`
    pub osv_api_url: String,

    /// Default output format when no `--format` flag is provided.
    ///
    /// Valid values: "table", "json"
    /// Default: "table"
    pub default_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            request_timeout_secs: 10,
            osv_api_url: OSV_QUERY_URL.to_string(),
            default_format: "table".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from a specific file, falling back to defaults
    /// when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Like [`Config::load_from`], but a file that cannot be read or parsed
    /// is logged and replaced by the defaults.
    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring config file");
            Self::default()
        })
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vulntrack")
            .join("config.toml")
    }

    /// Renders the configuration as TOML, in the same layout as the file.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        Config::default().to_toml().unwrap_or_default()
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.cache_ttl_secs, 3600);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.osv_api_url, "https://api.osv.dev/v1/query");
        assert_eq!(config.default_format, "table");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "cache_ttl_secs = 60\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "cache_ttl_secs = \"soon\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_load_or_default_ignores_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "cache_ttl_secs = [").unwrap();

        assert_eq!(Config::load_from_or_default(&path), Config::default());
    }

    #[test]
    fn test_load_or_default_reads_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_format = \"json\"\n").unwrap();

        let config = Config::load_from_or_default(&path);
        assert_eq!(config.default_format, "json");
        assert_eq!(config.cache_ttl_secs, 3600);
    }

    #[test]
    fn test_to_toml_shows_effective_values() {
        let config = Config {
            request_timeout_secs: 3,
            osv_api_url: "http://localhost:8080/v1/query".to_string(),
            ..Config::default()
        };

        let rendered = config.to_toml().unwrap();

        assert!(rendered.contains("request_timeout_secs = 3"));
        assert!(rendered.contains("osv_api_url = \"http://localhost:8080/v1/query\""));
        assert_eq!(toml::from_str::<Config>(&rendered).unwrap(), config);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            cache_ttl_secs: 120,
            default_format: "json".to_string(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_generate_default_config() {
        let generated = Config::generate_default_config();
        assert!(generated.contains("cache_ttl_secs = 3600"));
        assert!(generated.contains("request_timeout_secs = 10"));
    }
}
