//! # File Snapshot Storage
//!
//! Each key is a JSON file in one directory (`<dir>/flower-basket.json`).
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write never leaves half a snapshot behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bloom_core::{SnapshotStorage, StorageError};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::snapshot::SnapshotRecord;

/// Directory-backed snapshot storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> DbResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        info!(dir = %dir.display(), "File snapshot storage ready");
        Ok(FileStorage { dir })
    }

    /// Directory holding the snapshot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File used for `key`. Anything outside `[A-Za-z0-9_-]` becomes `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    /// Every `*.json` snapshot in the directory, ordered by key.
    ///
    /// The key is the file stem and `updated_at` is the file's modification
    /// time. Leftover `.json.tmp` files are skipped.
    pub fn list_all(&self) -> DbResult<Vec<SnapshotRecord>> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let modified = fs::metadata(&path)?.modified()?;
            records.push(SnapshotRecord {
                key: key.to_string(),
                value: fs::read_to_string(&path)?,
                updated_at: DateTime::<Utc>::from(modified),
            });
        }

        records.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(records)
    }

    fn write_atomic(&self, path: &Path, value: &str) -> DbResult<()> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, path).map_err(DbError::from)
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(DbError::from(e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        self.write_atomic(&path, value)?;

        debug!(path = %path.display(), bytes = value.len(), "Snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_core::{BasketItem, BasketStore, BouquetSize, Money};

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert_eq!(storage.get("flower-basket").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("state")).unwrap();

        storage.set("flower-basket", "[]").unwrap();

        assert_eq!(storage.get("flower-basket").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("state").join("flower-basket.json").exists());
        assert!(!dir.path().join("state").join("flower-basket.json.tmp").exists());
    }

    #[test]
    fn test_key_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        assert_eq!(
            storage.path_for("../etc/passwd"),
            dir.path().join("___etc_passwd.json")
        );
    }

    #[test]
    fn test_basket_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        {
            let storage = FileStorage::open(dir.path()).unwrap();
            let mut store = BasketStore::open(storage);
            let tulips = BasketItem::new("f2", "Tulips", BouquetSize::S, Money::from_major(5), 3);
            store.add_item(tulips);
        }

        let store = BasketStore::open(FileStorage::open(dir.path()).unwrap());
        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), Money::from_major(15));
    }

    #[test]
    fn test_list_all_skips_temp_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        storage.set("flower-language", "ru").unwrap();
        storage.set("flower-basket", "[]").unwrap();
        fs::write(dir.path().join("flower-basket.json.tmp"), "[{").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let records = storage.list_all().unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["flower-basket", "flower-language"]);
        assert_eq!(records[1].value, "ru");
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();

        // A directory where the file should be
        fs::create_dir(storage.path_for("flower-basket")).unwrap();

        assert!(storage.get("flower-basket").is_err());
    }
}
