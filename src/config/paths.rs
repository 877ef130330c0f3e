//! Cross-platform directory path resolution
//!
//! Resolves where the configuration file lives.
//! - Linux/macOS: XDG_CONFIG_HOME/chart-credentials or ~/.config/chart-credentials
//! - Windows: %APPDATA%\chart-credentials\config

use std::path::PathBuf;

const APP_NAME: &str = "chart-credentials";

/// Get the configuration directory path
///
/// Checks CHART_CREDENTIALS_CONFIG_DIR environment variable first, then falls
/// back to the platform configuration directory.
pub fn config_dir() -> PathBuf {
    std::env::var("CHART_CREDENTIALS_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", APP_NAME)
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join(APP_NAME)
            }
        })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}
