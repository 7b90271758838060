//! Error types for the storage layer.
//!
//! [`StoreError`] is returned by all repository and service operations.
//! Constraint violations (bad input data hitting a CHECK or uniqueness
//! constraint) are classified separately from other database failures so
//! callers can surface them as client errors.

use thiserror::Error;

/// Errors that can occur in the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Write rejected by a database constraint (CHECK, NOT NULL, unique).
    /// Stems from bad input data, not infrastructure failure.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// `SQLite` database error other than a constraint violation.
    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Internal error (e.g. a panicked blocking task).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => {
                Self::Constraint(err.to_string())
            }
            _ => Self::Sqlite(err),
        }
    }
}

/// Convenience type alias for storage results.
pub type Result<T> = std::result::Result<T, StoreError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
