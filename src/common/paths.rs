//! Configuration paths
//!
//! Linux: `~/.config/treetest/`
//! macOS: `~/Library/Application Support/treetest/`
//! Windows: `%APPDATA%\treetest\`

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "treetest";

/// Environment variable that overrides the configuration file location
pub const CONFIG_ENV: &str = "TREETEST_CONFIG";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `TREETEST_CONFIG` wins over the platform directory.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    config_dir().map(|dir| dir.join("config.toml"))
}
