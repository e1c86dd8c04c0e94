//! Band aggregate persistence

use sqlx::{sqlite::SqliteRow, types::Json, Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::equality;
use crate::ids;
use crate::models::{Album, Band, BandFields, BandSummary};
use crate::{Error, Result};

/// Column list shared by every query that materializes a full [`Band`]
pub(crate) const BAND_COLUMNS: &str =
    "guid, name, genre, website, record_company, group_members, year_formed, albums, overall_rating";

/// Decode a row selected (or returned) with [`BAND_COLUMNS`]
pub(crate) fn band_from_row(row: &SqliteRow) -> Result<Band> {
    let guid: String = row.try_get("guid")?;
    let genre: Json<Vec<String>> = row.try_get("genre")?;
    let group_members: Json<Vec<String>> = row.try_get("group_members")?;
    let albums: Json<Vec<Album>> = row.try_get("albums")?;

    Ok(Band {
        id: parse_guid(&guid)?,
        fields: BandFields {
            name: row.try_get("name")?,
            genre: genre.0,
            website: row.try_get("website")?,
            record_company: row.try_get("record_company")?,
            group_members: group_members.0,
            year_formed: row.try_get("year_formed")?,
        },
        albums: albums.0,
        overall_rating: row.try_get("overall_rating")?,
    })
}

fn parse_guid(guid: &str) -> Result<Uuid> {
    Uuid::parse_str(guid).map_err(|e| Error::Database(sqlx::Error::Decode(Box::new(e))))
}

/// Store a new band with no albums and a zero rating
pub async fn create_band(pool: &SqlitePool, fields: BandFields) -> Result<Band> {
    let id = ids::generate();

    sqlx::query(
        r#"
        INSERT INTO bands (guid, name, genre, website, record_company, group_members, year_formed, albums, overall_rating)
        VALUES (?, ?, ?, ?, ?, ?, ?, '[]', 0.0)
        "#,
    )
    .bind(id.to_string())
    .bind(&fields.name)
    .bind(Json(&fields.genre))
    .bind(&fields.website)
    .bind(&fields.record_company)
    .bind(Json(&fields.group_members))
    .bind(fields.year_formed)
    .execute(pool)
    .await?;

    info!("Created band {} ({})", id, fields.name);

    Ok(Band {
        id,
        fields,
        albums: Vec::new(),
        overall_rating: 0.0,
    })
}

/// `{_id, name}` for every band, oldest first
pub async fn list_bands(pool: &SqlitePool) -> Result<Vec<BandSummary>> {
    let rows = sqlx::query("SELECT guid, name FROM bands ORDER BY rowid")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| -> Result<BandSummary> {
            let guid: String = row.try_get("guid")?;
            Ok(BandSummary {
                id: parse_guid(&guid)?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

/// Load a full band document
pub async fn get_band(pool: &SqlitePool, id: Uuid) -> Result<Band> {
    let row = sqlx::query(&format!("SELECT {} FROM bands WHERE guid = ?", BAND_COLUMNS))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => band_from_row(&row),
        None => Err(Error::band_not_found(id)),
    }
}

/// Replace every user-editable field of a band
///
/// Albums and the overall rating are left untouched. Fails with
/// [`Error::NoChange`] when `fields` matches the stored record exactly.
pub async fn update_band(pool: &SqlitePool, id: Uuid, fields: BandFields) -> Result<Band> {
    let current = get_band(pool, id).await?;

    let changed = equality::changed_fields(&current.fields, &fields);
    if changed.is_empty() {
        debug!("Rejecting no-op update of band {}", id);
        return Err(Error::NoChange);
    }

    let row = sqlx::query(&format!(
        r#"
        UPDATE bands
        SET name = ?, genre = ?, website = ?, record_company = ?, group_members = ?,
            year_formed = ?, updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        RETURNING {}
        "#,
        BAND_COLUMNS
    ))
    .bind(&fields.name)
    .bind(Json(&fields.genre))
    .bind(&fields.website)
    .bind(&fields.record_company)
    .bind(Json(&fields.group_members))
    .bind(fields.year_formed)
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    // Row can vanish between the read and the write if the band is deleted
    let band = match row {
        Some(row) => band_from_row(&row)?,
        None => return Err(Error::band_not_found(id)),
    };

    info!("Updated band {} (changed: {})", id, changed.join(", "));
    Ok(band)
}

/// Delete a band together with its embedded albums
pub async fn delete_band(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM bands WHERE guid = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::band_not_found(id));
    }

    info!("Deleted band {}", id);
    Ok(())
}

/// Delete every band, returning how many were removed
pub async fn clear_bands(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM bands").execute(pool).await?;

    info!("Cleared {} band(s)", result.rows_affected());
    Ok(result.rows_affected())
}
