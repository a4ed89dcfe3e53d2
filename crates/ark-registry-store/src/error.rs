//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A caller-chosen identifier collides with an existing reservation.
    ///
    /// Unlike the generator's candidate collisions this is a hard error:
    /// two different entities would share an identifier the caller
    /// explicitly picked, so it must surface rather than be retried.
    #[error("{ark} already exists")]
    AlreadyExists { ark: String },

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
