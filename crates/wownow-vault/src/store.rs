//! Key-value storage backends.
//!
//! Defines the [`KeyValueStore`] trait, the string-keyed, string-valued
//! persistent storage the vault writes into, plus two implementations:
//! [`MemoryStore`] (in-process, optional quota) and [`FileStore`] (a single
//! JSON object on disk).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::error::StorageError;

type StoreResult<T> = std::result::Result<T, StorageError>;

/// Synchronous string key-value store with last-writer-wins semantics.
///
/// Each `set` must be atomic for its key: a failed write leaves the previous
/// value in place.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Remove every key.
    fn clear(&self) -> StoreResult<()>;

    /// List all keys in sorted order.
    fn keys(&self) -> StoreResult<Vec<String>>;
}

/// Bytes a map occupies for quota purposes (keys plus values).
fn usage(entries: &BTreeMap<String, String>) -> u64 {
    entries
        .iter()
        .map(|(k, v)| (k.len() + v.len()) as u64)
        .sum()
}

/// Reject a write of `value` under `key` if it would push `entries` past `quota`.
fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota: Option<u64>,
) -> StoreResult<()> {
    let Some(quota) = quota else {
        return Ok(());
    };
    let replaced = entries
        .get(key)
        .map(|old| (key.len() + old.len()) as u64)
        .unwrap_or(0);
    let needed = usage(entries) - replaced + (key.len() + value.len()) as u64;
    if needed > quota {
        return Err(StorageError::QuotaExceeded { needed, quota });
    }
    Ok(())
}

/// In-process store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once keys plus values exceed `quota` bytes.
    pub fn with_quota(quota: u64) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota: Some(quota),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock();
        check_quota(&entries, key, value, self.quota)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.entries.lock().clear();
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}

/// A file-backed store.
///
/// All entries live in one JSON object at `path`. Every mutation rewrites the
/// file through a per-process temp file (created `0600` on Unix) and a rename,
/// so readers never see a partial file. The lock serializes writers within
/// this process only; two processes writing at once both read-modify-write the
/// whole map and the last rename wins, possibly dropping the other's entry.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota: Option<u64>,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota: None,
            lock: Mutex::new(()),
        }
    }

    pub fn with_quota(mut self, quota: Option<u64>) -> Self {
        self.quota = quota;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> StoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&data).map_err(|e| {
            StorageError::Corrupt(format!("{}: {e}", self.path.display()))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;

                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
                }
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let tmp = self.temp_path();
        if let Err(e) = write_private(&tmp, json.as_bytes()) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }

        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Sibling temp file, unique per process so concurrent writers never
    /// share one.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{name}.{}.tmp", std::process::id()))
    }
}

/// Create `path` with mode `0600` (on Unix) before any bytes land in it.
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        check_quota(&entries, key, value, self.quota)?;
        entries.insert(key.to_string(), value.to_string());
        debug!(key, path = %self.path.display(), "writing entry");
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            debug!(key, path = %self.path.display(), "removing entry");
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let _guard = self.lock.lock();
        debug!(path = %self.path.display(), "clearing store");
        self.write_entries(&BTreeMap::new())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_entries()?.into_keys().collect())
    }
}
