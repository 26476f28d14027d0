//! # Status Command
//!
//! Reports where the basket lives and what is stored there.
//!
//! ```text
//! {
//!   "backend": "sqlite",
//!   "location": "/home/me/.local/share/bloom/bloom.db",
//!   "healthy": true,
//!   "migrations": { "embedded": 1, "applied": 1, "current": true },
//!   "snapshots": [
//!     { "key": "flower-basket", "bytes": 214, "updatedAt": "2026-03-01T10:15:00+00:00" }
//!   ]
//! }
//! ```

use bloom_db::{MigrationStatus, SnapshotRecord};
use serde::Serialize;
use tracing::warn;

use crate::error::CliError;
use crate::state::{ConfigState, StorageBackend, StorageHandle};

/// Response DTO for `bloom status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub backend: String,

    /// Database file or snapshot directory; absent for the memory backend
    pub location: Option<String>,

    pub healthy: bool,

    /// Only reported for SQLite
    pub migrations: Option<MigrationsDto>,

    pub snapshots: Vec<SnapshotDto>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationsDto {
    pub embedded: usize,
    pub applied: usize,
    pub current: bool,
}

impl From<MigrationStatus> for MigrationsDto {
    fn from(status: MigrationStatus) -> Self {
        MigrationsDto {
            embedded: status.embedded,
            applied: status.applied,
            current: status.is_current(),
        }
    }
}

/// One stored key. The value itself is left out; `bloom show` prints it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDto {
    pub key: String,
    pub bytes: usize,
    pub updated_at: String,
}

impl From<&SnapshotRecord> for SnapshotDto {
    fn from(record: &SnapshotRecord) -> Self {
        SnapshotDto {
            key: record.key.clone(),
            bytes: record.value.len(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// Gathers backend, location, migration and snapshot details.
pub async fn status(
    storage: &StorageHandle,
    config: &ConfigState,
) -> Result<StatusResponse, CliError> {
    let backend = storage.backend();
    let location = match backend {
        StorageBackend::Sqlite => Some(config.database_path()),
        StorageBackend::File => Some(config.snapshots_dir()),
        StorageBackend::Memory => None,
    };

    let records = storage.snapshot_records().await?;
    let migrations = storage.migration_status().await?.map(MigrationsDto::from);
    if let Some(m) = migrations.filter(|m| !m.current) {
        warn!(embedded = m.embedded, applied = m.applied, "Database schema is behind");
    }

    Ok(StatusResponse {
        backend: backend.to_string(),
        location: location.map(|path| path.display().to_string()),
        healthy: storage.is_healthy().await,
        migrations,
        snapshots: records.iter().map(SnapshotDto::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_core::{BasketItem, BouquetSize, Money, SnapshotStorage};

    use crate::state::SharedBasket;

    fn config_in(dir: &std::path::Path, storage: StorageBackend) -> ConfigState {
        ConfigState {
            data_dir: dir.to_path_buf(),
            storage,
            ..ConfigState::default()
        }
    }

    #[tokio::test]
    async fn test_status_sqlite_lists_basket_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), StorageBackend::Sqlite);
        let storage = StorageHandle::open(&config).await.unwrap();

        let basket = SharedBasket::open(storage.clone());
        basket.with_basket_mut(|store| {
            let roses = BasketItem::new("f1", "Roses", BouquetSize::M, Money::from_major(10), 2);
            store.add_item(roses);
        });

        let response = status(&storage, &config).await.unwrap();
        storage.shutdown().await.unwrap();

        assert_eq!(response.backend, "sqlite");
        assert_eq!(
            response.location.as_deref(),
            Some(config.database_path().display().to_string().as_str())
        );
        assert!(response.healthy);
        let migrations = response.migrations.unwrap();
        assert_eq!(migrations.embedded, migrations.applied);
        assert!(migrations.current);

        assert_eq!(response.snapshots.len(), 1);
        assert_eq!(response.snapshots[0].key, bloom_core::BASKET_STORAGE_KEY);
        assert!(response.snapshots[0].bytes > 2);
    }

    #[tokio::test]
    async fn test_status_file_backend_has_no_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), StorageBackend::File);
        let storage = StorageHandle::open(&config).await.unwrap();
        storage.set(bloom_core::LANGUAGE_STORAGE_KEY, "ru").unwrap();

        let response = status(&storage, &config).await.unwrap();

        assert_eq!(response.backend, "file");
        assert!(response.healthy);
        assert!(response.migrations.is_none());
        assert_eq!(response.snapshots.len(), 1);
        assert_eq!(response.snapshots[0].bytes, 2);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["snapshots"][0]["key"], "flower-language");
        assert!(json["snapshots"][0]["updatedAt"].is_string());
    }
}
