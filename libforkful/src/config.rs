//! Configuration management for Forkful

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Image used for recipes created without one
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1495521821757-a1efb6729352?w=800&h=600&fit=crop";

/// Number of recipes in the trending view
pub const DEFAULT_TRENDING_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// JSON seed file; the built-in dataset is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session user; defaults to the first seed user
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

fn default_trending_limit() -> usize {
    DEFAULT_TRENDING_LIMIT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            placeholder_image: default_placeholder_image(),
            trending_limit: default_trending_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; the default configuration is
    /// returned instead.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Seed file path with `~` expanded
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed
            .path
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }
}

/// Resolve the configuration file path under the XDG config directory
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("FORKFUL_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("forkful").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.seed.path.is_none());
        assert!(config.session.user_id.is_none());
        assert_eq!(config.defaults.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(config.defaults.trending_limit, 3);
    }

    #[test]
    fn test_load_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[session]
user_id = "u2"

[defaults]
trending_limit = 5
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.session.user_id.as_deref(), Some("u2"));
        assert_eq!(config.defaults.trending_limit, 5);
        assert_eq!(config.defaults.placeholder_image, DEFAULT_PLACEHOLDER_IMAGE);
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session\nuser_id = ").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(
            result,
            Err(crate::ForkfulError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_load_missing_path_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(&temp_dir.path().join("nope.toml"));
        assert!(matches!(
            result,
            Err(crate::ForkfulError::Config(ConfigError::ReadError(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_load_respects_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        std::fs::write(&path, "[seed]\npath = \"/tmp/seed.json\"\n").unwrap();

        std::env::set_var("FORKFUL_CONFIG", &path);
        let config = Config::load();
        std::env::remove_var("FORKFUL_CONFIG");

        let config = config.unwrap();
        assert_eq!(config.seed_path(), Some(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    #[serial]
    fn test_load_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::env::set_var("FORKFUL_CONFIG", temp_dir.path().join("absent.toml"));
        let config = Config::load();
        std::env::remove_var("FORKFUL_CONFIG");

        assert_eq!(config.unwrap(), Config::default());
    }
}
