//! Persistence boundary for the session.
//!
//! The session only needs opaque save/load of its persisted subset under a
//! fixed namespace key; everything beyond that is a backend concern.
//! Backends are async so IO-bound implementations fit behind the same
//! trait as the in-process one.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::state::PersistedState;

/// Error types for storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend cannot be used at all (quota, access denial).
    Unavailable(String),
    /// Reading or writing the underlying medium failed.
    Io(String),
    /// The stored payload could not be encoded or decoded.
    Serialization(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            StorageError::Io(msg) => write!(f, "Storage IO error: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key-value store for the persisted session subset.
///
/// Implementations must be `Send + Sync`; the session calls them from the
/// debounced append task as well as from direct mutations.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Durably save `state` under `key`, replacing any previous value.
    async fn save(&self, key: &str, state: &PersistedState) -> StorageResult<()>;

    /// Load the subset saved under `key`, or `None` when nothing was saved.
    async fn load(&self, key: &str) -> StorageResult<Option<PersistedState>>;

    /// Backend name used in log lines.
    fn backend_name(&self) -> &str;
}

/// Behaviors for [`MemoryStorage`].
#[derive(Debug, Clone)]
pub enum MemoryMode {
    /// Store entries normally.
    Store,
    /// Fail every operation with the given message, simulating quota or
    /// access denial.
    Unavailable(String),
}

/// Deterministic in-process backend.
///
/// Entries are kept as encoded JSON so the same round-trip a durable
/// backend performs is exercised.
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    mode: MemoryMode,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            entries: Mutex::new(HashMap::new()),
            mode: MemoryMode::Store,
        }
    }

    pub fn with_mode(mode: MemoryMode) -> Self {
        MemoryStorage {
            entries: Mutex::new(HashMap::new()),
            mode,
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn save(&self, key: &str, state: &PersistedState) -> StorageResult<()> {
        if let MemoryMode::Unavailable(msg) = &self.mode {
            return Err(StorageError::Unavailable(msg.clone()));
        }
        let encoded = serde_json::to_string(state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.entries.lock().insert(key.to_owned(), encoded);
        Ok(())
    }

    async fn load(&self, key: &str) -> StorageResult<Option<PersistedState>> {
        if let MemoryMode::Unavailable(msg) = &self.mode {
            return Err(StorageError::Unavailable(msg.clone()));
        }
        match self.entries.lock().get(key) {
            Some(encoded) => serde_json::from_str(encoded)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

/// File-backed backend: one `<key>.json` per namespace inside a directory.
///
/// The directory is created on the first save if missing; a missing file
/// on load means nothing was saved yet.
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SessionStorage for JsonFileStorage {
    async fn save(&self, key: &str, state: &PersistedState) -> StorageResult<()> {
        let encoded = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to create directory '{}': {}",
                self.dir.display(),
                e
            ))
        })?;
        let path = self.path_for(key);
        tokio::fs::write(&path, encoded).await.map_err(|e| {
            StorageError::Io(format!("Failed to write file '{}': {}", path.display(), e))
        })
    }

    async fn load(&self, key: &str) -> StorageResult<Option<PersistedState>> {
        let path = self.path_for(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "Failed to read file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&content).map(Some).map_err(|e| {
            StorageError::Serialization(format!(
                "Failed to parse JSON from '{}': {}",
                path.display(),
                e
            ))
        })
    }

    fn backend_name(&self) -> &str {
        "json-file"
    }
}
