//! # Snapshot Repository
//!
//! One row per storage key in the `snapshots` table:
//!
//! ```text
//! key              value                                      updated_at
//! ───────────────  ─────────────────────────────────────────  ───────────────────────────
//! flower-basket    [{"flowerId":"f1","size":2,...}]           2026-03-01T10:15:00.123Z
//! flower-language  ar                                         2026-03-01T10:14:02.004Z
//! ```
//!
//! Values are opaque here. Parsing them is the basket store's job.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// A stored snapshot row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for snapshot rows.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Inserts or replaces the value under `key`, stamping `updated_at`.
    pub async fn upsert(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, value, updated_at)
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

        debug!(key = %key, bytes = value.len(), "Snapshot saved");
        Ok(())
    }

    /// Every stored row, ordered by key. Used for the preload and for
    /// `bloom status`.
    pub async fn list_all(&self) -> DbResult<Vec<SnapshotRecord>> {
        let records = sqlx::query_as::<_, SnapshotRecord>(
            "SELECT key, value, updated_at FROM snapshots ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn repo() -> (Database, super::SnapshotRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.snapshots();
        (db, repo)
    }

    #[tokio::test]
    async fn test_fresh_table_is_empty() {
        let (_db, repo) = repo().await;
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_replaces_value() {
        let (_db, repo) = repo().await;

        repo.upsert("flower-basket", "[]").await.unwrap();
        let first = repo.list_all().await.unwrap().remove(0);

        repo.upsert("flower-basket", r#"[{"flowerId":"f1"}]"#).await.unwrap();
        let rows = repo.list_all().await.unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, r#"[{"flowerId":"f1"}]"#);
        assert!(rows[0].updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_list_all_orders_by_key() {
        let (_db, repo) = repo().await;

        repo.upsert("flower-language", "ru").await.unwrap();
        repo.upsert("flower-basket", "[]").await.unwrap();

        let rows = repo.list_all().await.unwrap();
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["flower-basket", "flower-language"]);
        assert_eq!(rows[1].value, "ru");
    }
}
