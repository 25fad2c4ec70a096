//! Configuration loading and persistence.

use super::Config;
use crate::env;
use crate::error::ConfigError;
use crate::paths;
use crate::secret::SecretString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load from `path`, or defaults when the file does not exist.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(path)) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 doesn't have a serializer, so we use serde_json with pretty print
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `WOWNOW_*` environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(path) = env::get_var(env::vars::STORE) {
            self.storage.path = Some(paths::expand_tilde(&path));
        }
        if let Some(quota) = env::get_u64(env::vars::QUOTA) {
            self.storage.quota_bytes = Some(quota);
        }
        if let Some(origin) = env::get_var(env::vars::ORIGIN) {
            self.encryption.origin = Some(origin);
        }
        if let Some(passphrase) = env::get_var(env::vars::PASSPHRASE) {
            self.encryption.passphrase = SecretString::new(passphrase);
        }
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.encryption.passphrase.is_empty() {
            errors.push("Encryption passphrase must not be empty".to_string());
        }

        if let Some(origin) = &self.encryption.origin {
            if origin.trim().is_empty() {
                errors.push("Encryption origin must not be blank when set".to_string());
            }
        }

        if self.storage.quota_bytes == Some(0) {
            errors.push("Storage quota must be greater than 0".to_string());
        }

        if let Some(path) = &self.storage.path {
            if path.as_os_str().is_empty() {
                errors.push("Storage path must not be empty when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Storage file location, expanding `~` and falling back to the default path.
    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.path {
            Some(path) => Ok(paths::expand_tilde(&path.to_string_lossy())),
            None => paths::storage_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json5_with_comments() {
        let config = Config::parse(
            r#"{
                // local cache
                storage: { path: "/tmp/wownow.json", quota_bytes: 5242880 },
                encryption: { origin: "app.iwownow.ai" },
            }"#,
        )
        .unwrap();
        assert_eq!(config.storage.path, Some(PathBuf::from("/tmp/wownow.json")));
        assert_eq!(config.storage.quota_bytes, Some(5_242_880));
        assert_eq!(config.encryption.origin.as_deref(), Some("app.iwownow.ai"));
        assert_eq!(
            config.encryption.passphrase.expose_secret(),
            crate::config::DEFAULT_PASSPHRASE
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Config::parse("not valid json"),
            Err(ConfigError::Json5(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json5")).unwrap();
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_load_or_default_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json5");
        fs::write(&path, "{{{").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut config = Config::default();
        config.encryption.passphrase = SecretString::new("");
        config.encryption.origin = Some("  ".to_string());
        config.storage.quota_bytes = Some(0);

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("passphrase"));
        assert!(err.contains("origin"));
        assert!(err.contains("quota"));
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_storage_path_override() {
        let mut config = Config::default();
        config.storage.path = Some(PathBuf::from("/var/tmp/store.json"));
        assert_eq!(
            config.storage_path().unwrap(),
            PathBuf::from("/var/tmp/store.json")
        );
    }
}
