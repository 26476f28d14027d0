//! # Storage State
//!
//! Opens the configured snapshot backend and closes it cleanly at exit.
//!
//! ```text
//! StorageBackend::Sqlite ──► Database::new + SqliteStorage::open
//! StorageBackend::File   ──► FileStorage::open(<data dir>/snapshots)
//! StorageBackend::Memory ──► MemoryStorage::new
//! ```
//!
//! Clones are cheap and share the same backend, so the basket store can own
//! one while the shell keeps another for preferences and shutdown.

use bloom_core::{MemoryStorage, SnapshotStorage, StorageError};
use bloom_db::{Database, DbConfig, FileStorage, MigrationStatus, SnapshotRecord, SqliteStorage};
use tracing::info;

use super::config::{ConfigState, StorageBackend};
use crate::error::CliError;

/// Handle to whichever backend the configuration selected.
#[derive(Debug, Clone)]
pub enum StorageHandle {
    Sqlite { db: Database, storage: SqliteStorage },
    File(FileStorage),
    Memory(MemoryStorage),
}

impl StorageHandle {
    /// Opens the backend named by `config.storage`.
    pub async fn open(config: &ConfigState) -> Result<Self, CliError> {
        let handle = match config.storage {
            StorageBackend::Sqlite => {
                let db = Database::new(DbConfig::new(config.database_path())).await?;
                let storage = SqliteStorage::open(&db).await?;
                StorageHandle::Sqlite { db, storage }
            }
            StorageBackend::File => {
                StorageHandle::File(FileStorage::open(config.snapshots_dir())?)
            }
            StorageBackend::Memory => StorageHandle::Memory(MemoryStorage::new()),
        };

        info!(backend = %handle.backend(), "Storage opened");
        Ok(handle)
    }

    pub fn backend(&self) -> StorageBackend {
        match self {
            StorageHandle::Sqlite { .. } => StorageBackend::Sqlite,
            StorageHandle::File(_) => StorageBackend::File,
            StorageHandle::Memory(_) => StorageBackend::Memory,
        }
    }

    /// Stored snapshot rows or files, ordered by key. The memory backend
    /// starts empty in every process, so it reports none.
    pub async fn snapshot_records(&self) -> Result<Vec<SnapshotRecord>, CliError> {
        let records = match self {
            StorageHandle::Sqlite { db, storage } => {
                storage.flush().await?;
                db.snapshots().list_all().await?
            }
            StorageHandle::File(storage) => storage.list_all()?,
            StorageHandle::Memory(_) => Vec::new(),
        };
        Ok(records)
    }

    /// Migration counts; `None` for backends without a schema.
    pub async fn migration_status(&self) -> Result<Option<MigrationStatus>, CliError> {
        match self {
            StorageHandle::Sqlite { db, .. } => Ok(Some(db.migration_status().await?)),
            StorageHandle::File(_) | StorageHandle::Memory(_) => Ok(None),
        }
    }

    /// Whether the backend can still serve reads and writes.
    pub async fn is_healthy(&self) -> bool {
        match self {
            StorageHandle::Sqlite { db, .. } => db.health_check().await,
            StorageHandle::File(storage) => storage.dir().is_dir(),
            StorageHandle::Memory(_) => true,
        }
    }

    /// Waits for pending writes and releases the database.
    pub async fn shutdown(&self) -> Result<(), CliError> {
        if let StorageHandle::Sqlite { db, storage } = self {
            storage.flush().await?;
            db.close().await;
        }
        Ok(())
    }
}

impl SnapshotStorage for StorageHandle {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            StorageHandle::Sqlite { storage, .. } => storage.get(key),
            StorageHandle::File(storage) => storage.get(key),
            StorageHandle::Memory(storage) => storage.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            StorageHandle::Sqlite { storage, .. } => storage.set(key, value),
            StorageHandle::File(storage) => storage.set(key, value),
            StorageHandle::Memory(storage) => storage.set(key, value),
        }
    }
}
