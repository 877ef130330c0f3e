//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. Root config file
//! 3. Built-in defaults

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers applied
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load configuration rooted at a specific file
    ///
    /// A missing file means defaults; a file that cannot be read or parsed is
    /// an error.
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("Config file not found, using defaults: {}", path.display());
            Config::default()
        };

        Ok(Self::apply_overrides(config, |key| std::env::var(key).ok()))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // An empty file is valid and means defaults
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load and validate the configuration
    pub fn validate() -> Result<Config> {
        let config = Self::load().context("Failed to load configuration")?;
        Self::check(&config)?;
        Ok(config)
    }

    fn check(config: &Config) -> Result<()> {
        if config.default_namespace.trim().is_empty() {
            anyhow::bail!("defaultNamespace cannot be empty");
        }
        Ok(())
    }

    /// Apply environment variable overrides, reading variables through `var`
    fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(namespace) =
            var("CHART_CREDENTIALS_DEFAULT_NAMESPACE").filter(|value| !value.is_empty())
        {
            config.default_namespace = namespace;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(ConfigLoader::load_file(&path).is_err());
        assert!(ConfigLoader::load_from(&path).is_ok());
        assert_eq!(
            ConfigLoader::apply_overrides(Config::default(), |_| None),
            Config::default()
        );
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "defaultNamespace: brokered\n").unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.default_namespace, "brokered");
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "\n").unwrap();

        assert_eq!(ConfigLoader::load_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "defaultNamespace: [nope").unwrap();

        let error = format!("{:#}", ConfigLoader::load_file(&path).unwrap_err());
        assert!(error.contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([("CHART_CREDENTIALS_DEFAULT_NAMESPACE", "services")]);

        let config = ConfigLoader::apply_overrides(Config::default(), |key| {
            vars.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.default_namespace, "services");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = ConfigLoader::apply_overrides(Config::default(), |_| Some(String::new()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_check_rejects_blank_namespace() {
        let config = Config {
            default_namespace: "  ".to_string(),
        };
        assert!(ConfigLoader::check(&config).is_err());
        assert!(ConfigLoader::check(&Config::default()).is_ok());
    }
}
