//! Persistent key-value storage for the device session.
//!
//! Only two keys are ever written: [`TOKEN_KEY`] and [`USER_KEY`]. Each
//! `set`/`remove` is atomic for its key; keeping the two keys consistent with
//! each other is the session manager's job.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Key holding the opaque bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the serialized user profile.
pub const USER_KEY: &str = "user";

/// Errors raised by a session store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Asynchronous key-value store that survives process restarts.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-local store. Used in tests and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Store backed by a single JSON object on disk.
///
/// Every mutation rewrites the whole file through a sibling temp file and a
/// rename, so readers never observe a half-written value.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(HashMap::new()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let bytes = serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), keys = entries.len(), "Session file written");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_get_remove() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);

        store.set(TOKEN_KEY, "t1").await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("t1"));

        store.remove(TOKEN_KEY).await.unwrap();
        store.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileSessionStore::new(&path);
        store.set(TOKEN_KEY, "t1").await.unwrap();
        store.set(USER_KEY, "{\"id\":\"u1\"}").await.unwrap();
        drop(store);

        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).await.unwrap().as_deref(), Some("t1"));
        assert_eq!(
            reopened.get(USER_KEY).await.unwrap().as_deref(),
            Some("{\"id\":\"u1\"}")
        );

        reopened.remove(TOKEN_KEY).await.unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).await.unwrap(), None);
        assert!(reopened.get(USER_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("absent.json"));
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
        store.remove(USER_KEY).await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileSessionStore::new(&path);
        let err = store.get(TOKEN_KEY).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
