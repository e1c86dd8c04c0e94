//! Database initialization
//!
//! Opens (or creates) the SQLite database and makes sure the `bands` table
//! exists. Table creation is idempotent, so every startup runs it.

use crate::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Lock wait before a statement fails with SQLITE_BUSY
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Pragmas go on the connect options so every pooled connection gets them;
    // WAL lets readers proceed while an album mutation holds the write lock
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let options = SqliteConnectOptions::from_str(&db_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_bands_table(&pool).await?;

    Ok(pool)
}

/// Private in-memory database with the full schema
///
/// Restricted to a single connection that never expires; every SQLite
/// in-memory connection is its own database.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    create_bands_table(&pool).await?;

    Ok(pool)
}

/// Create the bands table
///
/// One row per band document. `genre`, `group_members` and `albums` hold
/// JSON arrays; albums are embedded objects using their wire shape.
pub async fn create_bands_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bands (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            genre TEXT NOT NULL,
            website TEXT NOT NULL,
            record_company TEXT NOT NULL,
            group_members TEXT NOT NULL,
            year_formed INTEGER NOT NULL,
            albums TEXT NOT NULL DEFAULT '[]',
            overall_rating REAL NOT NULL DEFAULT 0.0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
