//! AES-256-GCM envelopes keyed by SHA-256 of passphrase and origin.
//!
//! An envelope is `base64(nonce || ciphertext || tag)` with a fresh 12-byte
//! nonce per call. The key is recomputed from [`KeyMaterial`] on every
//! operation and zeroed when dropped.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};
use wownow_core::SecretString;
use zeroize::Zeroizing;

use crate::error::{Result, VaultError};

/// Nonce length in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;
const KEY_SIZE: usize = 32;

/// Passphrase and origin that together determine the storage key.
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    passphrase: SecretString,
    origin: String,
}

impl KeyMaterial {
    pub fn new(passphrase: impl Into<SecretString>, origin: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
            origin: origin.into(),
        }
    }

    /// Build from the encryption section of the config.
    pub fn from_config(config: &wownow_core::config::EncryptionConfig) -> Self {
        Self::new(config.passphrase.clone(), config.resolve_origin())
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// SHA-256 over `passphrase || origin`.
    pub fn derive_key(&self) -> Zeroizing<[u8; KEY_SIZE]> {
        let mut hasher = Sha256::new();
        hasher.update(self.passphrase.expose_secret().as_bytes());
        hasher.update(self.origin.as_bytes());
        Zeroizing::new(hasher.finalize().into())
    }
}

/// Encrypt `plaintext` into a base64 envelope.
pub fn seal(material: &KeyMaterial, plaintext: &str) -> Result<String> {
    let key = material.derive_key();
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| VaultError::Crypto(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|e| VaultError::Crypto(e.to_string()))?;

    let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(combined))
}

/// Decrypt an envelope produced by [`seal`].
pub fn open(material: &KeyMaterial, envelope: &str) -> Result<String> {
    let combined = STANDARD
        .decode(envelope)
        .map_err(|e| VaultError::Encoding(format!("base64 decode failed: {e}")))?;

    if combined.len() < NONCE_SIZE {
        return Err(VaultError::Encoding("envelope too short".to_string()));
    }
    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_SIZE);

    let key = material.derive_key();
    let cipher = Aes256Gcm::new_from_slice(key.as_slice())
        .map_err(|e| VaultError::Crypto(e.to_string()))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|e| VaultError::Crypto(e.to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|e| VaultError::Encoding(format!("invalid UTF-8: {e}")))
}
