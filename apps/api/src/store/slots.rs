//! String-keyed persistent slots.
//!
//! A slot holds one string value under a fixed key. Three backends share the `SlotStore`
//! trait: files in a directory (default), Redis, and process memory.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tracing::{debug, info};

/// Slot holding the serialized résumé document.
pub const RESUME_SLOT: &str = "current_resume";
/// Slot holding the user-entered AI credential.
pub const API_KEY_SLOT: &str = "gemini_api_key";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid slot key: {0}")]
    InvalidKey(String),

    #[error("Storage task failed: {0}")]
    Task(String),
}

#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Returns `None` when nothing has been stored under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// FileSlotStore
// ────────────────────────────────────────────────────────────────────────────

/// One file per key inside `dir`. Writes go to a temp file in the same directory and are
/// renamed over the target, so a crash mid-write never leaves a truncated slot.
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!("File slot store at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(key))
    }
}

fn write_atomic(dir: &Path, path: &Path, value: &str) -> Result<(), StorageError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(value.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| StorageError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl SlotStore for FileSlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let dir = self.dir.clone();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &value))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))??;

        debug!("Wrote slot '{key}'");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// RedisSlotStore
// ────────────────────────────────────────────────────────────────────────────

/// Slots as plain Redis string keys under a namespace prefix.
pub struct RedisSlotStore {
    client: redis::Client,
    prefix: String,
}

impl RedisSlotStore {
    pub fn open(redis_url: &str, prefix: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        info!("Redis slot store initialized (prefix: {prefix})");
        Ok(Self {
            client,
            prefix: prefix.to_string(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl SlotStore for RedisSlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(self.namespaced(key), value).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MemorySlotStore
// ────────────────────────────────────────────────────────────────────────────

/// Volatile slots. Nothing survives a restart.
#[derive(Default)]
pub struct MemorySlotStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, bypassing the trait.
    pub fn with_slot(self, key: &str, value: &str) -> Self {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Reads like an empty store; every write fails.
#[cfg(test)]
#[derive(Default)]
pub struct FailingSlotStore;

#[cfg(test)]
#[async_trait]
impl SlotStore for FailingSlotStore {
    async fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
