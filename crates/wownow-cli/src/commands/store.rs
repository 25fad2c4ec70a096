//! Local storage commands.
//!
//! `save` and `load` go through the fail-open encrypted path, so a failed
//! write is reported by reading the value back rather than by an error.

use anyhow::Context;
use serde_json::Value;

use super::Overrides;

/// Encrypt and store a JSON value.
pub async fn save(overrides: &Overrides, key: &str, json: &str) -> anyhow::Result<()> {
    let value: Value =
        serde_json::from_str(json).with_context(|| format!("Value for '{key}' is not valid JSON"))?;

    let storage = overrides.open_encrypted()?;
    storage.save_encrypted(key, &value).await;

    match storage.load_encrypted::<Value>(key).await {
        Some(stored) if stored == value => {
            println!("Saved '{}'.", key);
            Ok(())
        }
        _ => anyhow::bail!("Value for '{}' was not stored (see warnings above)", key),
    }
}

/// Decrypt and print a stored value.
pub async fn load(overrides: &Overrides, key: &str) -> anyhow::Result<()> {
    let storage = overrides.open_encrypted()?;
    match storage.load_encrypted::<Value>(key).await {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("No value stored under '{}'.", key),
    }
    Ok(())
}

/// List stored keys.
pub fn keys(overrides: &Overrides) -> anyhow::Result<()> {
    let storage = overrides.open_encrypted()?;
    let keys = storage.store().keys()?;

    if keys.is_empty() {
        println!("Storage is empty.");
    } else {
        for key in &keys {
            println!("{}", key);
        }
        println!("\n{} key(s) total.", keys.len());
    }
    Ok(())
}

/// Remove one key.
pub async fn remove(overrides: &Overrides, key: &str) -> anyhow::Result<()> {
    let storage = overrides.open_encrypted()?;
    storage.remove(key).await;
    println!("Removed '{}'.", key);
    Ok(())
}

/// Remove every key.
pub async fn clear(overrides: &Overrides) -> anyhow::Result<()> {
    let storage = overrides.open_encrypted()?;
    storage.clear().await;
    println!("Storage cleared.");
    Ok(())
}
