//! # Database Migrations
//!
//! Embedded SQL migrations for Shoebox.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `002_add_blob_index.sql`)
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds all SQL files into the binary at
/// compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// - Creates `_sqlx_migrations` table if not exists
/// - Runs any pending migrations in filename order
/// - Each migration runs in a transaction
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns (total_migrations, applied_migrations), for diagnostics.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_all_migrations_applied() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let (total, applied) = migration_status(db.pool()).await.unwrap();
        assert!(total >= 1);
        assert_eq!(total, applied);

        // Second run is a no-op
        db.run_migrations().await.unwrap();
        let (_, applied_again) = migration_status(db.pool()).await.unwrap();
        assert_eq!(applied, applied_again);
    }
}
