//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in bloom                                  │
//! │                                                                         │
//! │  Command function                                                       │
//! │  Result<T, CliError>                                                    │
//! │         │                                                               │
//! │         ├── ValidationError ──► VALIDATION_ERROR                        │
//! │         ├── DbError ──────────► DATABASE_ERROR / STORAGE_ERROR          │
//! │         ├── CoreError ────────► (by wrapped error)                      │
//! │         └── serde_json ───────► INTERNAL                                │
//! │                                                                         │
//! │  main() prints the error as JSON on stderr and exits non-zero:         │
//! │  {"code":"VALIDATION_ERROR","message":"quantity must be positive"}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bloom_core::{CoreError, StorageError, ValidationError};
use bloom_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from commands.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Snapshot storage failed
    StorageError,

    /// Database could not be opened or migrated
    DatabaseError,

    /// Anything else
    Internal,
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// JSON form printed on stderr.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Converts database errors to CLI errors.
impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                tracing::error!(error = %err, "Database connection failed");
                CliError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                tracing::error!(error = %err, "Database migration failed");
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::Io(_) | DbError::WriterStopped => {
                CliError::new(ErrorCode::StorageError, err.to_string())
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => CliError::from(e),
            CoreError::Storage(e) => CliError::from(e),
            CoreError::Snapshot(msg) => CliError::internal(msg),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Could not encode output: {err}"))
    }
}
