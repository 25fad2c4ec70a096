//! Fail-open encrypted persistence over a [`KeyValueStore`].
//!
//! Values are serialized to JSON, sealed into an envelope, and written under
//! the caller's key. Reads reverse the process and fall back to parsing the
//! raw stored text as JSON, which covers records written before encryption
//! was introduced.
//!
//! Nothing here returns an error. Every failure is logged at `warn` and
//! degrades to "keep the old value" (writes) or "absent" (reads). This is
//! suitable for reconstructible UI state only; the key is derived from a
//! bundled passphrase and a public origin, so it is obfuscation rather than
//! confidentiality.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::crypto::{self, KeyMaterial};
use crate::error::{Result, VaultError};
use crate::store::KeyValueStore;

/// Encrypted view over a shared key-value store.
#[derive(Clone)]
pub struct EncryptedStorage {
    store: Arc<dyn KeyValueStore>,
    material: KeyMaterial,
}

impl EncryptedStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, material: KeyMaterial) -> Self {
        Self { store, material }
    }

    /// The underlying store, for callers that also keep plain entries.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Encrypt `plaintext`, returning it unchanged if encryption fails.
    pub fn encrypt(&self, plaintext: &str) -> String {
        match crypto::seal(&self.material, plaintext) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "encryption failed, storing plaintext");
                plaintext.to_string()
            }
        }
    }

    /// Decrypt `envelope`, returning it unchanged if decryption fails.
    pub fn decrypt(&self, envelope: &str) -> String {
        match crypto::open(&self.material, envelope) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(error = %e, "decryption failed, returning input");
                envelope.to_string()
            }
        }
    }

    /// Serialize, encrypt and store `value` under `key`.
    ///
    /// Failures are logged and swallowed; the previous value, if any, stays.
    pub async fn save_encrypted<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        if let Err(e) = self.try_save(key, value) {
            warn!(key, error = %e, "failed to save encrypted data");
        }
    }

    fn try_save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)?;
        let envelope = self.encrypt(&json);
        self.store.set(key, &envelope)?;
        debug!(key, "saved encrypted entry");
        Ok(())
    }

    /// Load and decrypt the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or nothing readable is stored.
    pub async fn load_encrypted<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read stored data");
                return None;
            }
        };

        match self.open_and_parse(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "failed to load encrypted data, trying plain JSON");
                match serde_json::from_str(&raw) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(key, error = %e, "stored data is not plain JSON either");
                        None
                    }
                }
            }
        }
    }

    fn open_and_parse<T>(&self, raw: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let plaintext = crypto::open(&self.material, raw)?;
        serde_json::from_str(&plaintext).map_err(VaultError::from)
    }

    /// Remove `key`. Failures are logged and swallowed.
    pub async fn remove(&self, key: &str) {
        match self.store.remove(key) {
            Ok(()) => debug!(key, "removed entry"),
            Err(e) => warn!(key, error = %e, "failed to remove entry"),
        }
    }

    /// Remove every key in the store. Failures are logged and swallowed.
    pub async fn clear(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear storage");
        }
    }
}
