/// Application configuration
///
/// The API key comes from the `PIXABAY_API_KEY` environment variable, or
/// failing that from a JSON config file:
/// - Linux: ~/.config/pixgrid/config.json
/// - macOS: ~/Library/Application Support/pixgrid/config.json
/// - Windows: %APPDATA%\pixgrid\config.json

use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable that overrides the config file
const API_KEY_ENV: &str = "PIXABAY_API_KEY";

/// Results per page requested from the API when the config doesn't say
const DEFAULT_PER_PAGE: u32 = 40;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "no API key found: set {API_KEY_ENV} or put {{\"api_key\": \"...\"}} in {0}"
    )]
    MissingApiKey(String),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// What the config file may contain
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    api_key: String,
    per_page: Option<u32>,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent with every search request
    pub api_key: String,
    /// Results per page, 1-based paging
    pub per_page: u32,
}

impl Config {
    /// Load configuration from the environment or the config file
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(Config {
                    api_key: key.trim().to_string(),
                    per_page: DEFAULT_PER_PAGE,
                });
            }
        }

        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            let file = Self::parse(&contents).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
            return Ok(Config {
                api_key: file.api_key,
                per_page: file.per_page.unwrap_or(DEFAULT_PER_PAGE),
            });
        }

        Err(ConfigError::MissingApiKey(path.display().to_string()))
    }

    /// Where the config file lives
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("pixgrid");
        path.push("config.json");
        path
    }

    fn parse(contents: &str) -> Result<ConfigFile, serde_json::Error> {
        serde_json::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let file = Config::parse(r#"{"api_key": "abc123", "per_page": 20}"#).unwrap();
        assert_eq!(file.api_key, "abc123");
        assert_eq!(file.per_page, Some(20));
    }

    #[test]
    fn test_parse_defaults_per_page() {
        let file = Config::parse(r#"{"api_key": "abc123"}"#).unwrap();
        assert_eq!(file.per_page, None);
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        assert!(Config::parse(r#"{"per_page": 20}"#).is_err());
    }
}
