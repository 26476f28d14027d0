//! # bloom-db: Snapshot Storage for Bloom Basket
//!
//! Durable backends for the basket's `SnapshotStorage` seam. SQLite is the
//! default; plain JSON files are available where a database is overkill.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bloom Basket Data Flow                           │
//! │                                                                         │
//! │  BasketStore::add_item (bloom-core)                                    │
//! │       │  storage.set("flower-basket", json)                            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bloom-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SqliteStorage │    │   Database    │    │  Migrations  │  │   │
//! │  │   │ (sqlite.rs)   │───►│   (pool.rs)   │    │  (embedded)  │  │   │
//! │  │   │ cache + queue │    │ SnapshotRepo  │    │ 001_basket_  │  │   │
//! │  │   └───────────────┘    └───────────────┘    │ snapshots    │  │   │
//! │  │   ┌───────────────┐                         └──────────────┘  │   │
//! │  │   │ FileStorage   │  <dir>/<key>.json                         │   │
//! │  │   └───────────────┘                                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bloom_core::{BasketStore, BasketItem};
//! use bloom_db::{Database, DbConfig, SqliteStorage};
//!
//! let db = Database::new(DbConfig::new("./bloom.db")).await?;
//! let storage = SqliteStorage::open(&db).await?;
//!
//! let mut store = BasketStore::open(&storage);
//! store.add_item(item);
//!
//! storage.flush().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use file::FileStorage;
pub use migrations::MigrationStatus;
pub use pool::{Database, DbConfig};
pub use repository::snapshot::{SnapshotRecord, SnapshotRepository};
pub use sqlite::SqliteStorage;
