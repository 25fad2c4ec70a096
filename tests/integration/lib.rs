//! Shared fixtures for the integration tests.

use tempfile::TempDir;
use wownow_core::config::Config;

/// Config whose store lives in `dir` and whose key uses `origin`.
pub fn config_in(dir: &TempDir, origin: &str) -> Config {
    let mut config = Config::default();
    config.storage.path = Some(dir.path().join("local-storage.json"));
    config.encryption.origin = Some(origin.to_string());
    config
}
