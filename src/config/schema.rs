//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.

use crate::secret::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace for secret references that do not name one
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(Config::default().default_namespace, "default");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_camel_case_keys() {
        let yaml = serde_yaml::to_string(&Config {
            default_namespace: "brokered".to_string(),
        })
        .unwrap();
        assert_eq!(yaml, "defaultNamespace: brokered\n");
    }
}
