use crate::{DbError, Result as DbErrorResult, migrate};

use ident_core::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// Open (creating if needed) the identity database and bring its schema up to date.
///
/// `acquire_timeout` bounds how long a store call may wait for a connection.
pub async fn connect(
    path: &Path,
    max_connections: u32,
    acquire_timeout: Duration,
) -> DbErrorResult<SqlitePool> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DbError::Initialization {
                message: format!("Failed to create database directory: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;

    info!("Identity store ready at {}", path.display());
    Ok(pool)
}
