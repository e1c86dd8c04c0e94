//! Album sub-resource operations
//!
//! Albums live inside their band's `albums` JSON array. Inserting or removing
//! one is a single UPDATE statement that rewrites the array and recomputes
//! `overall_rating` from the rewritten array, so the rating can never be
//! derived from a stale copy of the albums.

use sqlx::{types::Json, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use super::bands::{band_from_row, get_band, BAND_COLUMNS};
use crate::models::{Album, AlbumFields, Band};
use crate::{Error, Result};

/// Overall rating expression over the albums produced by `source`
///
/// Ratings carry at most one decimal, so the mean is taken in integer tenths
/// and rounded half-up there. Rounding the floating-point mean instead turns
/// ties such as 3.05 into 3.0. Yields 0.0 when no album is rated.
fn overall_rating_sql(source: &str) -> String {
    let tenths = "CAST(ROUND(json_extract(entry.value, '$.rating') * 10) AS INTEGER)";
    format!(
        r#"COALESCE(
                (SELECT CAST((2 * SUM({tenths}) + COUNT({tenths})) / (2 * COUNT({tenths})) AS REAL) / 10.0
                 FROM {source}),
                0.0)"#,
        tenths = tenths,
        source = source
    )
}

/// All albums of a band, in insertion order
///
/// An empty vector means the band exists but has no albums.
pub async fn list_albums(pool: &SqlitePool, band_id: Uuid) -> Result<Vec<Album>> {
    let band = get_band(pool, band_id).await?;
    debug!("Band {} has {} album(s)", band_id, band.albums.len());
    Ok(band.albums)
}

/// Find an album by id across all bands
pub async fn get_album(pool: &SqlitePool, album_id: Uuid) -> Result<Album> {
    let album: Option<Json<Album>> = sqlx::query_scalar(
        r#"
        SELECT json(entry.value)
        FROM bands, json_each(bands.albums) AS entry
        WHERE json_extract(entry.value, '$._id') = ?
        LIMIT 1
        "#,
    )
    .bind(album_id.to_string())
    .fetch_optional(pool)
    .await?;

    album
        .map(|json| json.0)
        .ok_or_else(|| Error::album_not_found(album_id))
}

/// Append a new album to a band and recompute its rating
///
/// The title guard and the append run in the same statement. When nothing is
/// updated, a follow-up lookup decides between a missing band and a title
/// collision.
pub async fn create_album(pool: &SqlitePool, band_id: Uuid, fields: AlbumFields) -> Result<Band> {
    let album = Album::new(fields);
    let album_json = serde_json::to_string(&album)?;

    let row = sqlx::query(&format!(
        r#"
        UPDATE bands
        SET albums = json_insert(albums, '$[#]', json(?1)),
            overall_rating = {rating},
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?2
          AND NOT EXISTS (
              SELECT 1 FROM json_each(bands.albums) AS entry
              WHERE json_extract(entry.value, '$.title') = ?3)
        RETURNING {columns}
        "#,
        rating = overall_rating_sql("json_each(json_insert(bands.albums, '$[#]', json(?1))) AS entry"),
        columns = BAND_COLUMNS
    ))
    .bind(&album_json)
    .bind(band_id.to_string())
    .bind(&album.title)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let band = band_from_row(&row)?;
            info!(
                "Added album {} ({}) to band {}; overall rating now {}",
                album.id, album.title, band_id, band.overall_rating
            );
            Ok(band)
        }
        None => {
            let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM bands WHERE guid = ?")
                .bind(band_id.to_string())
                .fetch_optional(pool)
                .await?;

            if exists.is_none() {
                Err(Error::band_not_found(band_id))
            } else {
                Err(Error::DuplicateTitle {
                    title: album.title,
                    band_id,
                })
            }
        }
    }
}

/// Remove an album from whichever band holds it and recompute that band's rating
pub async fn remove_album(pool: &SqlitePool, album_id: Uuid) -> Result<Band> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE bands
        SET albums = (
                SELECT json_group_array(json(entry.value))
                FROM json_each(bands.albums) AS entry
                WHERE json_extract(entry.value, '$._id') <> ?1),
            overall_rating = {rating},
            updated_at = CURRENT_TIMESTAMP
        WHERE EXISTS (
            SELECT 1 FROM json_each(bands.albums) AS entry
            WHERE json_extract(entry.value, '$._id') = ?1)
        RETURNING {columns}
        "#,
        rating = overall_rating_sql(
            "json_each(bands.albums) AS entry WHERE json_extract(entry.value, '$._id') <> ?1"
        ),
        columns = BAND_COLUMNS
    ))
    .bind(album_id.to_string())
    .fetch_optional(pool)
    .await?;

    let band = match row {
        Some(row) => band_from_row(&row)?,
        None => return Err(Error::album_not_found(album_id)),
    };

    info!(
        "Removed album {} from band {}; overall rating now {}",
        album_id, band.id, band.overall_rating
    );
    Ok(band)
}
