//! Unit tests for database initialization
//!
//! - Automatic database creation (including missing parent directories)
//! - Reopening an existing database keeps its data
//! - In-memory databases are isolated from each other

use bandstore_common::db::init::BUSY_TIMEOUT;
use bandstore_common::db::{bands, init_database, init_in_memory};
use bandstore_common::BandFields;

fn fields() -> BandFields {
    BandFields {
        name: "Chase Atlantic".to_string(),
        genre: vec!["Alternative".to_string()],
        website: "http://www.chaseatlantic.com".to_string(),
        record_company: "Warner Bros".to_string(),
        group_members: vec!["Mitchel Cave".to_string()],
        year_formed: 2011,
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("bands.db");

    let result = init_database(&db_path).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bands")
        .fetch_one(&result.unwrap())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_database_reopen_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("bands.db");

    let pool = init_database(&db_path).await.unwrap();
    let band = bands::create_band(&pool, fields()).await.unwrap();
    pool.close().await;

    let reopened = init_database(&db_path).await.unwrap();
    let loaded = bands::get_band(&reopened, band.id).await.unwrap();
    assert_eq!(loaded.fields, fields());
    reopened.close().await;
}

#[tokio::test]
async fn test_in_memory_databases_are_isolated() {
    let first = init_in_memory().await.unwrap();
    let second = init_in_memory().await.unwrap();

    bands::create_band(&first, fields()).await.unwrap();

    assert_eq!(bands::list_bands(&first).await.unwrap().len(), 1);
    assert!(bands::list_bands(&second).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pragmas_apply_to_every_pooled_connection() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("bands.db")).await.unwrap();

    // Hold two connections at once so the second one is freshly opened
    let mut first = pool.acquire().await.unwrap();
    let mut second = pool.acquire().await.unwrap();

    for conn in [&mut first, &mut second] {
        let timeout: i64 = sqlx::query_scalar("PRAGMA busy_timeout")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(timeout, BUSY_TIMEOUT.as_millis() as i64);

        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&mut **conn)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
