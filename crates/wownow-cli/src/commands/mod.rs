//! CLI command implementations.

pub mod config;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use wownow_core::config::Config;
use wownow_core::paths;
use wownow_vault::{EncryptedStorage, FileStore, KeyMaterial};

/// Global flags that take precedence over the config file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub origin: Option<String>,
}

impl Overrides {
    /// Config file in effect.
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(paths::config_file()?),
        }
    }

    /// Load the config file (or defaults), then env vars, then these flags.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let path = self.config_path()?;
        let mut config = Config::load_or_default(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
        config.apply_env();

        if let Some(store) = &self.store {
            config.storage.path = Some(store.clone());
        }
        if let Some(origin) = &self.origin {
            config.encryption.origin = Some(origin.clone());
        }

        config.validate()?;
        Ok(config)
    }

    /// Encrypted view over the configured store.
    pub fn open_encrypted(&self) -> anyhow::Result<EncryptedStorage> {
        let config = self.resolve_config()?;
        let material = KeyMaterial::from_config(&config.encryption);
        tracing::debug!(origin = material.origin(), "using storage origin");
        Ok(EncryptedStorage::new(file_store(&config)?, material))
    }
}

fn file_store(config: &Config) -> anyhow::Result<Arc<FileStore>> {
    let store = FileStore::new(config.storage_path()?).with_quota(config.storage.quota_bytes);
    tracing::debug!(path = %store.path().display(), "opening local storage");
    Ok(Arc::new(store))
}
