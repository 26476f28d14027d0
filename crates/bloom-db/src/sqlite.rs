//! # SQLite Snapshot Storage
//!
//! `SnapshotStorage` is synchronous, SQLite access is not. `SqliteStorage`
//! bridges the two with a read cache and a write-behind queue.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Write-Behind Storage                              │
//! │                                                                         │
//! │  open(&db) ──► SELECT * FROM snapshots ──► cache (HashMap)             │
//! │                                                                         │
//! │  get(key) ──► cache                                                    │
//! │                                                                         │
//! │  set(key, value)                                                       │
//! │    ├── cache.insert(key, value)                                        │
//! │    └── tx.send(Put) ──► writer task ──► UPSERT snapshots               │
//! │                                                                         │
//! │  flush().await ──► tx.send(Flush) ──► ack after every earlier Put      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The writer applies commands in send order, so a flush acknowledgement
//! means everything set before it has reached SQLite (or failed and been
//! logged).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bloom_core::{SnapshotStorage, StorageError};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::snapshot::SnapshotRepository;

/// Commands for the writer task.
#[derive(Debug)]
enum WriterCommand {
    /// Persist a value.
    Put { key: String, value: String },
    /// Acknowledge once every earlier command is done.
    Flush(oneshot::Sender<()>),
}

/// SQLite-backed snapshot storage with an in-process read cache.
///
/// Must be opened inside a tokio runtime; the writer task lives as long as
/// any clone of the storage does.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    cache: Arc<Mutex<HashMap<String, String>>>,
    cmd_tx: mpsc::UnboundedSender<WriterCommand>,
}

impl SqliteStorage {
    /// Loads every stored snapshot into the cache and starts the writer.
    pub async fn open(db: &Database) -> DbResult<Self> {
        let repo = db.snapshots();

        let cache: HashMap<String, String> = repo
            .list_all()
            .await?
            .into_iter()
            .map(|record| (record.key, record.value))
            .collect();

        info!(keys = cache.len(), "Snapshot storage ready");

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(repo, cmd_rx));

        Ok(SqliteStorage {
            cache: Arc::new(Mutex::new(cache)),
            cmd_tx,
        })
    }

    /// Waits until every value set so far has been written.
    pub async fn flush(&self) -> DbResult<()> {
        let (ack_tx, ack_rx) = oneshot::channel();

        self.cmd_tx
            .send(WriterCommand::Flush(ack_tx))
            .map_err(|_| DbError::WriterStopped)?;

        ack_rx.await.map_err(|_| DbError::WriterStopped)
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cache().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.cache().insert(key.to_string(), value.to_string());

        self.cmd_tx
            .send(WriterCommand::Put {
                key: key.to_string(),
                value: value.to_string(),
            })
            .map_err(|_| StorageError::from(DbError::WriterStopped))
    }
}

/// Writer loop. Ends when every `SqliteStorage` clone is dropped.
async fn run_writer(repo: SnapshotRepository, mut cmd_rx: mpsc::UnboundedReceiver<WriterCommand>) {
    debug!("Snapshot writer started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            WriterCommand::Put { key, value } => {
                if let Err(e) = repo.upsert(&key, &value).await {
                    error!(key = %key, error = %e, "Error saving snapshot");
                }
            }
            WriterCommand::Flush(ack) => {
                // Caller may have stopped waiting
                let _ = ack.send(());
            }
        }
    }

    debug!("Snapshot writer stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use bloom_core::{BasketItem, BasketStore, BouquetSize, Money, BASKET_STORAGE_KEY};

    fn roses(qty: i64) -> BasketItem {
        BasketItem::new("f1", "Red Roses", BouquetSize::M, Money::from_major(10), qty)
    }

    #[tokio::test]
    async fn test_set_is_visible_before_flush() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = SqliteStorage::open(&db).await.unwrap();

        storage.set("flower-language", "ru").unwrap();

        assert_eq!(storage.get("flower-language").unwrap().as_deref(), Some("ru"));
    }

    #[tokio::test]
    async fn test_flush_writes_through() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = SqliteStorage::open(&db).await.unwrap();

        storage.set("flower-language", "en").unwrap();
        storage.set("flower-language", "ar").unwrap();
        storage.flush().await.unwrap();

        let rows = db.snapshots().list_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, "ar");
    }

    #[tokio::test]
    async fn test_basket_survives_reopen() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let storage = SqliteStorage::open(&db).await.unwrap();
            let mut store = BasketStore::open(&storage);
            store.add_item(roses(2));
            store.add_item(roses(1));
            storage.flush().await.unwrap();
        }

        let storage = SqliteStorage::open(&db).await.unwrap();
        let store = BasketStore::open(&storage);

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), Money::from_major(30));
        assert!(storage.get(BASKET_STORAGE_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_write_is_logged_not_returned() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let storage = SqliteStorage::open(&db).await.unwrap();

        sqlx::query("DROP TABLE snapshots").execute(db.pool()).await.unwrap();

        // Cache still accepts the value; the writer logs the failure
        storage.set("flower-language", "ru").unwrap();
        storage.flush().await.unwrap();

        assert_eq!(storage.get("flower-language").unwrap().as_deref(), Some("ru"));
    }
}
