//! Configuration schema definitions.

use crate::secret::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Passphrase the client has always mixed into the storage key.
pub const DEFAULT_PASSPHRASE: &str = "wn-encryption-key";

/// Origin used when neither configuration nor the OS provides one.
pub const FALLBACK_ORIGIN: &str = "localhost";

/// Main WowNow configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Storage encryption settings.
    #[serde(default)]
    pub encryption: EncryptionConfig,
}

/// Storage configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Location of the local storage file. Defaults to `~/.wownow/local-storage.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Maximum number of bytes (keys plus values) the store may hold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<u64>,
}

/// Encryption configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Application passphrase.
    #[serde(default = "default_passphrase")]
    pub passphrase: SecretString,

    /// Origin identifier. When unset the machine hostname is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

fn default_passphrase() -> SecretString {
    SecretString::new(DEFAULT_PASSPHRASE)
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            passphrase: default_passphrase(),
            origin: None,
        }
    }
}

impl EncryptionConfig {
    /// Resolve the origin: configured value, then hostname, then `localhost`.
    ///
    /// Data written under one origin cannot be decrypted under another.
    pub fn resolve_origin(&self) -> String {
        if let Some(origin) = &self.origin {
            return origin.clone();
        }
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| FALLBACK_ORIGIN.to_string())
    }
}
