//! Error types for the local vault.

use thiserror::Error;

/// Errors raised by the vault's strict (non fail-open) operations.
///
/// [`crate::EncryptedStorage`] never returns these to its callers; it logs
/// them and degrades instead.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised by a [`crate::KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage quota exceeded: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded { needed: u64, quota: u64 },

    #[error("Storage file is corrupt: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
