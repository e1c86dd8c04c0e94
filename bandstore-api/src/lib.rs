//! bandstore-api library - HTTP surface for the band store
//!
//! Bands live at `/bands`, their albums at `/albums`. Every error leaves as
//! `{"error": "<message>"}` with a 400, 404 or 500 status.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::band_routes())
        .merge(api::album_routes())
        .merge(api::health_routes())
        .fallback(api::route_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
