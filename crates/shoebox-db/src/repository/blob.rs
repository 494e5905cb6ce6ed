//! # Blob Repository
//!
//! Key-value storage of whole UTF-8 values.
//!
//! ## Semantics
//! - Reading an absent key yields `None`, not an error
//! - Writing always replaces the full value (upsert)
//! - `updated_at` records the last write

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for blob database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BlobRepository::new(pool);
///
/// repo.put("@RocketShoes:cart", "[]").await?;
/// assert_eq!(repo.get("@RocketShoes:cart").await?.as_deref(), Some("[]"));
/// ```
#[derive(Debug, Clone)]
pub struct BlobRepository {
    pool: SqlitePool,
}

impl BlobRepository {
    /// Creates a new BlobRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BlobRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        debug!(key = %key, "Loading blob");

        let value: Option<String> = sqlx::query_scalar("SELECT value FROM blobs WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Saving blob");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO blobs (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the value under `key`.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        debug!(key = %key, "Deleting blob");

        let result = sqlx::query("DELETE FROM blobs WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Blob", key));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
