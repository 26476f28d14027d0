//! # Repository Module
//!
//! SQL lives here and nowhere else. Callers go through
//! `db.snapshots()` rather than touching the pool.
//!
//! ## Available Repositories
//!
//! - [`SnapshotRepository`](snapshot::SnapshotRepository) - key/value snapshot rows

pub mod snapshot;
