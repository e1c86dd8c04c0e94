//! Band endpoints
//!
//! - `GET /bands`: id and name of every band
//! - `POST /bands`: create a band
//! - `GET /bands/:id`: full band document
//! - `PUT /bands/:id`: replace the band's scalar fields
//! - `DELETE /bands/:id`: delete a band and its albums

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use bandstore_common::{db::bands, ids, Band, BandSummary, Validator};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{ApiResult, AppState};

/// Response body of a successful delete
#[derive(Debug, Serialize)]
pub struct BandDeleted {
    #[serde(rename = "bandId")]
    pub band_id: Uuid,
    pub deleted: bool,
}

/// GET /bands
pub async fn list_bands(State(state): State<AppState>) -> ApiResult<Json<Vec<BandSummary>>> {
    let summaries = bands::list_bands(&state.db).await?;
    Ok(Json(summaries))
}

/// POST /bands
pub async fn create_band(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Band>> {
    let Json(body) = body?;
    let fields = Validator::new().band(&body)?;
    let band = bands::create_band(&state.db, fields).await?;
    Ok(Json(band))
}

/// GET /bands/:id
pub async fn get_band(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Band>> {
    let id = ids::parse_id(&id)?;
    let band = bands::get_band(&state.db, id).await?;
    Ok(Json(band))
}

/// PUT /bands/:id
///
/// The id is checked before the body so a bad id is reported even when the
/// body is also invalid.
pub async fn update_band(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Band>> {
    let id = ids::parse_id(&id)?;
    let Json(body) = body?;
    let fields = Validator::new().band(&body)?;
    let band = bands::update_band(&state.db, id, fields).await?;
    Ok(Json(band))
}

/// DELETE /bands/:id
pub async fn delete_band(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BandDeleted>> {
    let id = ids::parse_id(&id)?;
    bands::delete_band(&state.db, id).await?;
    Ok(Json(BandDeleted { band_id: id, deleted: true }))
}

/// Build band routes
pub fn band_routes() -> Router<AppState> {
    Router::new()
        .route("/bands", get(list_bands).post(create_band))
        .route(
            "/bands/:id",
            get(get_band).put(update_band).delete(delete_band),
        )
}
