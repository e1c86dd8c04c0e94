//! Identity utilities
//!
//! Band and album identities are UUIDv4 values rendered in hyphenated
//! lowercase form, both in storage and on the wire.

use uuid::Uuid;

use crate::{Error, Result};

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse an identity from a request path segment
///
/// Surrounding whitespace is ignored. Anything that is not a UUID is
/// reported as [`Error::InvalidId`].
pub fn parse_id(raw: &str) -> Result<Uuid> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidId("id must be a non-empty string".to_string()));
    }
    Uuid::parse_str(trimmed).map_err(|_| Error::InvalidId(trimmed.to_string()))
}
