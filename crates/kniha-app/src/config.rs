//! Configuration management for kniha-jazd
//!
//! Config stored at: ~/.config/kniha-jazd/config.json

use kniha_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_DIR: &str = "kniha-jazd";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory for trips.json (default: data dir)
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Master data catalog (default: config dir/catalog.toml)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// How long an unconfirmed preview stays available
    #[serde(default = "default_preview_ttl_secs")]
    pub preview_ttl_secs: u64,

    /// Fixed RNG seed for reproducible generation
    #[serde(default)]
    pub seed: Option<u64>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_preview_ttl_secs() -> u64 {
    30 * 60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            catalog_path: None,
            preview_ttl_secs: default_preview_ttl_secs(),
            seed: None,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Directory holding the trip store
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    pub fn catalog_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.catalog_path {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("catalog.toml"))
    }

    pub fn preview_ttl(&self) -> Duration {
        Duration::from_secs(self.preview_ttl_secs)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_json(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Kniha jázd Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:      {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(
            f,
            "Catalog:        {}",
            self.catalog_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Preview TTL:    {} s", self.preview_ttl_secs)?;
        writeln!(
            f,
            "Seed:           {}",
            self.seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "(random)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kniha_types::Error;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{"seed": 42}"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.preview_ttl_secs, 1800);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.preview_ttl(), Duration::from_secs(1800));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config {
            store_dir: Some(PathBuf::from("/tmp/kniha")),
            catalog_path: Some(PathBuf::from("/tmp/kniha/catalog.toml")),
            ..Config::default()
        };
        assert_eq!(config.store_dir().unwrap(), PathBuf::from("/tmp/kniha"));
        assert_eq!(
            config.catalog_path().unwrap(),
            PathBuf::from("/tmp/kniha/catalog.toml")
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }
}
