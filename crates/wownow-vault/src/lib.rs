//! Encrypted local key-value persistence for WowNow.
//!
//! Values are stored as AES-256-GCM envelopes keyed by a passphrase and the
//! deployment origin, with a fail-open policy: nothing in
//! [`EncryptedStorage`] ever returns an error to its caller.

pub mod app_storage;
pub mod crypto;
pub mod error;
pub mod persist;
pub mod produce;
pub mod store;
pub mod types;

pub use app_storage::AppStorage;
pub use crypto::KeyMaterial;
pub use error::{Result, StorageError, VaultError};
pub use persist::EncryptedStorage;
pub use produce::{ProduceState, ProduceStore};
pub use store::{FileStore, KeyValueStore, MemoryStore};
