//! Path resolution utilities.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the WowNow base directory (~/.wownow).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".wownow"))
}

/// Get the main config file path (~/.wownow/wownow.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("wownow.json5"))
}

/// Get the default local storage file (~/.wownow/local-storage.json).
pub fn storage_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("local-storage.json"))
}

/// Expand tilde (~) in a path.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
