//! # Error Types
//!
//! Domain-specific error types for bloom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bloom-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── StorageError     - What a SnapshotStorage backend reports         │
//! │                                                                         │
//! │  bloom-db errors (separate crate)                                      │
//! │  └── DbError          - SQLite / file failures (→ StorageError)        │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Note on the Basket Store
//! `BasketStore` operations never return these errors. A malformed snapshot
//! or a failed write is logged and absorbed; the in-memory basket stays the
//! source of truth for the session.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Persisted basket snapshot could not be decoded.
    ///
    /// ## When This Occurs
    /// - Snapshot is not JSON (truncated write, manual edit)
    /// - Snapshot is JSON but not an array of basket records
    /// - A record has a field of the wrong type (e.g. `"price": "ten"`)
    #[error("Malformed basket snapshot: {0}")]
    Snapshot(String),

    /// The snapshot storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Snapshot(err.to_string())
    }
}

// =============================================================================
// Storage Error
// =============================================================================

/// Errors reported by a [`SnapshotStorage`](crate::storage::SnapshotStorage)
/// implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Backend cannot be reached (closed pool, stopped writer task).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Local I/O failure (permissions, disk full).
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by [`crate::validation`] before user input reaches the basket.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
