//! Runtime configuration
//!
//! Defaults, then `~/.postboard/config.yaml`, then environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILE, ENV_API_URL, ENV_TIMEOUT_SECS,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL every endpoint path is appended to
    pub api_base_url: String,
    /// Request timeout; `None` or `0` leaves it to the transport defaults
    pub timeout_secs: Option<u64>,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            timeout_secs: None,
            log_file: String::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Read a YAML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT_SECS))?;
            self.timeout_secs = Some(secs);
        }
        Ok(())
    }

    /// Effective request timeout. Zero means no timeout rather than one
    /// that expires before any request can complete.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

/// Location of the user config file
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join("config.yaml")
}

/// Load the effective configuration for this process
pub fn load() -> Result<Config> {
    let mut config = Config::from_file(&config_path())?;
    config.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base_url: http://localhost:3000\ntimeout_secs: 5\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "timeout_secs: [not, a, number]\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, " http://127.0.0.1:8080 "),
            (ENV_TIMEOUT_SECS, "12"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout_secs, Some(12));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "timeout_secs: 0\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.timeout_secs, Some(0));
        assert!(config.timeout().is_none());

        let mut config = Config::default();
        config
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| String::from("0")))
            .unwrap();
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_bad_timeout_override_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_TIMEOUT_SECS).then(|| String::from("soon"))
        });
        assert!(result.is_err());
    }
}
