//! Common error types for bandstore

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationError;

/// Common result type for bandstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store and the HTTP layer
///
/// Each variant maps to exactly one client-facing status class, so callers
/// match on the variant instead of inspecting messages.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or out-of-range input (first violation in the message)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Identity string is not a well-formed UUID
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Referenced band or album does not exist
    #[error("{0}")]
    NotFound(String),

    /// Album title already used within the same band
    #[error("Album with title \"{title}\" already exists for band with ID {band_id}")]
    DuplicateTitle { title: String, band_id: Uuid },

    /// Update request is identical to the stored record
    #[error("No changes made to the band")]
    NoChange,

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Band lookup miss
    pub fn band_not_found(id: Uuid) -> Self {
        Error::NotFound(format!("Band with ID {} does not exist", id))
    }

    /// Album lookup miss
    pub fn album_not_found(id: Uuid) -> Self {
        Error::NotFound(format!("Album with ID {} does not exist", id))
    }

    /// True for errors caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::InvalidId(_)
                | Error::NotFound(_)
                | Error::DuplicateTitle { .. }
                | Error::NoChange
        )
    }
}
