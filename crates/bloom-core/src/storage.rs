//! # Snapshot Storage
//!
//! The key-value capability the basket store persists through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SnapshotStorage                                  │
//! │                                                                         │
//! │     get(key) → Option<String>          set(key, value)                  │
//! │              ▲                                │                         │
//! │              │ once, at open                  │ after every mutation    │
//! │              │                                ▼                         │
//! │  ┌───────────┴───────────┬──────────────────────────┬────────────────┐ │
//! │  │ MemoryStorage (here)  │ FileStorage (bloom-db)   │ SqliteStorage  │ │
//! │  │ HashMap, tests        │ <dir>/<key>.json         │ (bloom-db)     │ │
//! │  └───────────────────────┴──────────────────────────┴────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Implementations must not block for long: the store calls `set` inline on
//! every mutation and does not wait for any acknowledgement beyond the
//! returned `Result`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StorageError;

/// On-device key-value storage for string snapshots.
pub trait SnapshotStorage {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().insert(key.into(), value.into());
        storage
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
