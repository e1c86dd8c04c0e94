//! HTTP API handlers for bandstore-api

pub mod albums;
pub mod bands;
pub mod health;

use axum::http::Uri;
use tracing::debug;

use crate::ApiError;

pub use albums::album_routes;
pub use bands::band_routes;
pub use health::health_routes;

/// Fallback for any request no route matched
pub async fn route_not_found(uri: Uri) -> ApiError {
    debug!("No route for {}", uri);
    ApiError::NotFound("Route Not Found".to_string())
}
