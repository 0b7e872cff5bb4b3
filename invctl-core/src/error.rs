//! Structured error types for invctl-core.
//!
//! The library returns `InventoryError`; the `invctl` binary wraps it in
//! `anyhow` for context chains.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ValidationError;

/// Main error type for invctl-core operations
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The storage file could not be opened
    #[error("Cannot open database {path:?}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// The migration script is missing or failed to execute
    #[error("Migration {path:?} failed: {reason}")]
    Migration { path: PathBuf, reason: String },

    /// A connection was requested before `Database::initialize`
    #[error("Database is not initialised")]
    NotInitialized,

    /// Product failed field validation; nothing was written
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Insert or update hit the unique SKU constraint
    #[error("A product with SKU '{sku}' already exists")]
    DuplicateSku { sku: String },

    /// Update targeted an id with no matching row
    #[error("No product with id {id}")]
    NotFound { id: i64 },

    /// Query preparation or execution failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for invctl-core operations
pub type Result<T> = std::result::Result<T, InventoryError>;

impl InventoryError {
    /// Create a connection error for the given storage path
    pub fn connection(path: impl Into<PathBuf>, source: sqlx::Error) -> Self {
        Self::Connection {
            path: path.into(),
            source,
        }
    }

    /// Create a migration error
    pub fn migration(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Migration {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
