//! # Cart Storage
//!
//! The key-value blob store the cart is persisted to.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStorage (trait)                             │
//! │                                                                         │
//! │   ┌───────────────────────────┐      ┌───────────────────────────┐      │
//! │   │      SqliteStorage        │      │      MemoryStorage        │      │
//! │   │                           │      │                           │      │
//! │   │  shoebox-db blobs table   │      │  HashMap behind a Mutex   │      │
//! │   │  survives restarts        │      │  tests, throwaway carts   │      │
//! │   └───────────────────────────┘      └───────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use shoebox_db::{Database, DbError};
use tracing::info;

use crate::error::StorageResult;

/// Device-local key-value blob store.
///
/// Reading an absent key yields `Ok(None)`. Writing replaces the full value.
/// Removing an absent key is not an error.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Reads the value under `key`.
    async fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` under `key`.
    async fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Drops the value under `key`.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Releases backend resources. Called once at teardown.
    async fn close(&self) {}
}

// =============================================================================
// SQLite
// =============================================================================

/// [`CartStorage`] backed by the SQLite blobs table.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    /// Wraps an open database.
    pub fn new(db: Database) -> Self {
        SqliteStorage { db }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl CartStorage for SqliteStorage {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.db.blobs().get(key).await?)
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        Ok(self.db.blobs().put(key, value).await?)
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        match self.db.blobs().delete(key).await {
            Ok(()) | Err(DbError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn close(&self) {
        info!("Closing cart storage");
        self.db.close().await;
    }
}

// =============================================================================
// Memory
// =============================================================================

/// In-memory [`CartStorage`].
///
/// All data is lost when the storage is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.put(key.into(), value.into());
        storage
    }

    /// Reads a value without going through the async trait.
    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn put(&self, key: String, value: String) {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, value);
    }
}

#[async_trait]
impl CartStorage for MemoryStorage {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.put(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoebox_db::DbConfig;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.load("cart").await.unwrap(), None);
        storage.save("cart", "[]").await.unwrap();
        assert_eq!(storage.load("cart").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get("cart").as_deref(), Some("[]"));

        storage.remove("cart").await.unwrap();
        storage.remove("cart").await.unwrap();
        assert_eq!(storage.get("cart"), None);
    }

    #[tokio::test]
    async fn test_sqlite_storage() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = SqliteStorage::new(db);

        assert_eq!(storage.load("cart").await.unwrap(), None);
        storage.save("cart", "[]").await.unwrap();
        storage.save("cart", "[ ]").await.unwrap();
        assert_eq!(storage.load("cart").await.unwrap().as_deref(), Some("[ ]"));

        storage.remove("cart").await.unwrap();
        assert_eq!(storage.load("cart").await.unwrap(), None);
        // Already gone
        storage.remove("cart").await.unwrap();

        storage.close().await;
        assert!(storage.load("cart").await.is_err());
    }
}
