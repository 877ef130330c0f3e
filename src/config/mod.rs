//! Configuration system
//!
//! A single YAML file sets the namespace secret references fall back to.
//! Environment variables override the file.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

/// Get a configuration value by key
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}
