//! Config save/load roundtrip integration tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use wownow_core::config::{Config, DEFAULT_PASSPHRASE};
use wownow_core::SecretString;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wownow.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.encryption.passphrase.expose_secret(), DEFAULT_PASSPHRASE);
    assert_eq!(loaded.storage.path, None);
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wownow.json5");

    let mut config = Config::default();
    config.storage.path = Some(PathBuf::from("/data/wownow/ls.json"));
    config.storage.quota_bytes = Some(5 * 1024 * 1024);
    config.encryption.origin = Some("app.iwownow.ai".to_string());
    config.encryption.passphrase = SecretString::new("rotated");
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.storage.path, config.storage.path);
    assert_eq!(loaded.storage.quota_bytes, Some(5 * 1024 * 1024));
    assert_eq!(loaded.encryption.origin.as_deref(), Some("app.iwownow.ai"));
    assert_eq!(loaded.encryption.passphrase.expose_secret(), "rotated");
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/wownow.json5"));
    assert!(result.is_err());
}

#[test]
fn test_config_parse_invalid() {
    assert!(Config::parse("not valid json").is_err());
}
