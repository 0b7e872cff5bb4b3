//! Connection manager for the inventory database
//!
//! `Database` owns the one SQLite connection the process uses.
//!
//! ```text
//! Uninitialized --initialize--> Initialized --close--> Closed
//!                                    ^                    |
//!                                    +----initialize------+
//! ```

use std::path::{Path, PathBuf};

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};

use super::migrations::{run_migrations, DEFAULT_MIGRATION_SCRIPT};
use crate::error::{InventoryError, Result};

/// Outcome of [`Database::close`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseStatus {
    /// The open connection was closed
    Closed,
    /// Nothing was open
    AlreadyClosed,
}

/// Owned handle to the inventory database
pub struct Database {
    conn: Option<SqliteConnection>,
    path: Option<PathBuf>,
    migration_script: PathBuf,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Uninitialized handle using the default migration script path
    pub fn new() -> Self {
        Self::with_migration_script(DEFAULT_MIGRATION_SCRIPT)
    }

    /// Uninitialized handle that migrates from `script`
    pub fn with_migration_script(script: impl Into<PathBuf>) -> Self {
        Self {
            conn: None,
            path: None,
            migration_script: script.into(),
        }
    }

    /// Open the database at `path` and run migrations.
    ///
    /// Does nothing if already initialized.
    ///
    /// # Errors
    ///
    /// [`InventoryError::Connection`] if the file cannot be opened,
    /// [`InventoryError::Migration`] if the schema script is missing or fails.
    pub async fn initialize(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let mut conn = options
            .connect()
            .await
            .map_err(|e| InventoryError::connection(path, e))?;

        run_migrations(&mut conn, &self.migration_script).await?;

        self.conn = Some(conn);
        self.path = Some(path.to_path_buf());

        tracing::info!(path = %path.display(), "Database initialised successfully");
        Ok(())
    }

    /// Borrow the open connection.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NotInitialized`] before `initialize` or after `close`.
    pub fn connection(&mut self) -> Result<&mut SqliteConnection> {
        self.conn.as_mut().ok_or(InventoryError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.conn.is_some()
    }

    /// Path of the open database file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection. Safe to call repeatedly.
    pub async fn close(&mut self) -> Result<CloseStatus> {
        let Some(conn) = self.conn.take() else {
            tracing::info!("Database already closed");
            return Ok(CloseStatus::AlreadyClosed);
        };

        let path = self.path.take();
        conn.close().await?;

        tracing::info!(path = ?path, "Database closed");
        Ok(CloseStatus::Closed)
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Dropping the sqlx connection closes the underlying sqlite handle
        if self.conn.take().is_some() {
            tracing::debug!(path = ?self.path, "Database dropped while open, closing");
        }
    }
}
