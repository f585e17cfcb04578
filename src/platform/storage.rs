//! Key/value storage backends
//!
//! The game only needs string get/set. Failures are reported, never fatal;
//! callers log them and keep playing with defaults.

use std::collections::HashMap;
use std::fmt;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage on this platform (private mode, no window, ...)
    Unavailable,
    /// Backend rejected the operation
    Backend(String),
    /// File system error
    Io(String),
    /// Stored data could not be encoded/decoded
    Encode(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Backend(msg) => write!(f, "storage backend error: {msg}"),
            Self::Io(msg) => write!(f, "storage io error: {msg}"),
            Self::Encode(msg) => write!(f, "storage encoding error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Minimal string key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (tests, headless runs without a save file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{e:?}")))
    }
}

/// A flat JSON object on disk. Writes go to a temp file, then replace the
/// existing one.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<std::collections::BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => {
                serde_json::from_str(&json).map_err(|e| StorageError::Encode(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Default::default()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future write
        let mut entries = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable {}: {e}", self.path.display());
            Default::default()
        });
        entries.insert(key.to_string(), value.to_string());

        let json =
            serde_json::to_string_pretty(&entries).map_err(|e| StorageError::Encode(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json).map_err(|e| StorageError::Io(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), Ok(None));
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k"), Ok(Some("v".to_string())));
        store.set("k", "w").unwrap();
        assert_eq!(store.get("k"), Ok(Some("w".to_string())));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("sky-flap-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let path = temp_path("missing.json");
        let store = JsonFileStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.get("highScore"), Ok(None));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store_persists_across_instances() {
        let path = temp_path("persist.json");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        store.set("highScore", "17").unwrap();
        store.set("other", "x").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("highScore"), Ok(Some("17".to_string())));
        assert_eq!(reopened.get("other"), Ok(Some("x".to_string())));
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store_corrupt_file() {
        let path = temp_path("corrupt.json");
        std::fs::write(&path, "{ nope").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.get("highScore"), Err(StorageError::Encode(_))));

        // Writing recovers the file
        store.set("highScore", "3").unwrap();
        assert_eq!(store.get("highScore"), Ok(Some("3".to_string())));
        let _ = std::fs::remove_file(&path);
    }
}
