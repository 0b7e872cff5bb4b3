//! Schema migration: one SQL script executed in full on first connection

use std::path::Path;

use sqlx::SqliteConnection;

use crate::error::{InventoryError, Result};

/// Script location relative to the working directory
pub const DEFAULT_MIGRATION_SCRIPT: &str = "migrations/001_initial_schema.sql";

/// Read `script` and execute it against `conn`.
///
/// There is no version table. Re-running is only safe if the script itself
/// uses `IF NOT EXISTS`.
pub async fn run_migrations(conn: &mut SqliteConnection, script: &Path) -> Result<()> {
    tracing::info!(script = %script.display(), "Running migrations...");

    let sql = tokio::fs::read_to_string(script)
        .await
        .map_err(|e| InventoryError::migration(script, format!("cannot read script: {}", e)))?;

    // Multi-statement script, so no prepared statement
    sqlx::raw_sql(&sql)
        .execute(&mut *conn)
        .await
        .map_err(|e| InventoryError::migration(script, format!("SQL error: {}", e)))?;

    tracing::info!("Migrations completed");
    Ok(())
}
