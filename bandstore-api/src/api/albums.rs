//! Album endpoints
//!
//! Albums are addressed through their band for listing and creation, and by
//! their own id for lookup and removal.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use bandstore_common::{db::albums, ids, Album, Band, Validator};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{ApiError, ApiResult, AppState};

/// Response body of a successful album removal
#[derive(Debug, Serialize)]
pub struct AlbumDeleted {
    #[serde(rename = "albumId")]
    pub album_id: Uuid,
    pub deleted: bool,
}

/// GET /albums/:band_id
///
/// A band without albums is reported as 404.
pub async fn list_albums(
    State(state): State<AppState>,
    Path(band_id): Path<String>,
) -> ApiResult<Json<Vec<Album>>> {
    let band_id = ids::parse_id(&band_id)?;
    let albums = albums::list_albums(&state.db, band_id).await?;
    if albums.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No albums found for band with ID {}",
            band_id
        )));
    }
    Ok(Json(albums))
}

/// POST /albums/:band_id
pub async fn create_album(
    State(state): State<AppState>,
    Path(band_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Band>> {
    let band_id = ids::parse_id(&band_id)?;
    let Json(body) = body?;
    let fields = Validator::new().album(&body)?;
    let band = albums::create_album(&state.db, band_id, fields).await?;
    Ok(Json(band))
}

/// GET /albums/album/:album_id
pub async fn get_album(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> ApiResult<Json<Album>> {
    let album_id = ids::parse_id(&album_id)?;
    let album = albums::get_album(&state.db, album_id).await?;
    Ok(Json(album))
}

/// DELETE /albums/album/:album_id
pub async fn remove_album(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> ApiResult<Json<AlbumDeleted>> {
    let album_id = ids::parse_id(&album_id)?;
    albums::remove_album(&state.db, album_id).await?;
    Ok(Json(AlbumDeleted { album_id, deleted: true }))
}

/// Build album routes
pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route("/albums/:band_id", get(list_albums).post(create_album))
        .route(
            "/albums/album/:album_id",
            get(get_album).delete(remove_album),
        )
}
