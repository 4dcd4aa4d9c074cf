use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Directory holding the session file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./.samuday")
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| "Failed to parse configuration file")?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    /// Path of the persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.client.data_dir.join("session.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            client: ClientConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.logging.level, "warn");
        assert!(config.session_path().ends_with("session.toml"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://society.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://society.example.com");
        assert_eq!(config.api.timeout, 30);
        assert_eq!(config.client.data_dir, PathBuf::from("./.samuday"));
    }
}
