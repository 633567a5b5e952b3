use crate::lookup::omdb::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const ENV_API_KEY: &str = "FLICKTUI_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no API key configured: set {ENV_API_KEY} or add `api_key` under [provider] in {0}"
    )]
    MissingApiKey(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// OMDb API key. May be left empty in the file and supplied via the
    /// FLICKTUI_API_KEY environment variable instead.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Config {
    /// Default location: ~/.config/flicktui/config.toml (platform dependent).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("flicktui").join("config.toml"))
    }

    /// Loads from `path` if it exists, otherwise starts from defaults, then
    /// applies the environment override for the API key.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };

        let mut config = match path.as_deref() {
            Some(p) if p.exists() => {
                let contents = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config at {}", p.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("invalid config at {}", p.display()))?
            }
            _ => Config::default(),
        };

        if let Ok(key) = std::env::var(ENV_API_KEY) {
            if !key.trim().is_empty() {
                config.provider.api_key = key.trim().to_string();
            }
        }

        if config.provider.api_key.is_empty() {
            let shown = path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the config file".to_string());
            return Err(ConfigError::MissingApiKey(shown).into());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file_with_overridden_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[provider]\napi_key = \"abc123\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.provider.api_key, "abc123");
        assert_eq!(config.provider.timeout_secs, 5);
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\ntimeout_secs = 5").unwrap();

        // Clear any ambient key for the duration of the load, then put it
        // back so other tests see the environment unchanged.
        let saved = std::env::var(ENV_API_KEY).ok();
        std::env::remove_var(ENV_API_KEY);

        let result = Config::load(Some(file.path()));

        if let Some(value) = saved {
            std::env::set_var(ENV_API_KEY, value);
        }

        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[provider]\napi_key = \"abc123\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.provider.timeout_secs, 20);
    }
}
