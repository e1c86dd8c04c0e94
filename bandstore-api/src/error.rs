//! Error types for bandstore-api
//!
//! Store errors are mapped onto statuses by variant. Server-side failures are
//! logged in full and reported to the client as a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bandstore_common::{Error, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// bandstore-common error, status decided by variant
    #[error(transparent)]
    Common(#[from] Error),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Common(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Common(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Common(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            debug!("Rejected request ({}): {}", status.as_u16(), self);
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_client_errors_map_to_400() {
        assert_eq!(ApiError::from(Error::NoChange).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(Error::InvalidId("abc".to_string())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::DuplicateTitle {
                title: "Ok Computer".to_string(),
                band_id: Uuid::new_v4(),
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BadRequest("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            ApiError::from(Error::band_not_found(Uuid::new_v4())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::NotFound("No albums".to_string()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_server_errors_map_to_500() {
        assert_eq!(
            ApiError::from(Error::Database(sqlx::Error::PoolClosed)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(Error::Config("broken".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_follows_client_error_classification() {
        let errors = vec![
            Error::NoChange,
            Error::InvalidId("abc".to_string()),
            Error::album_not_found(Uuid::new_v4()),
            Error::Config("broken".to_string()),
            Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
        ];

        for err in errors {
            let client = err.is_client_error();
            let status = ApiError::from(err).status();
            assert_eq!(status.is_client_error(), client, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_server_error_body_hides_detail() {
        let response = ApiError::from(Error::Database(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }
}
