//! # Bandstore Common Library
//!
//! Core of the band/album document service:
//! - Input validation (declarative field schemas)
//! - No-op update detection
//! - Band aggregate store and album sub-resource operations
//! - Configuration loading
//! - Error taxonomy

pub mod config;
pub mod db;
pub mod equality;
pub mod error;
pub mod ids;
pub mod models;
pub mod validation;

pub use error::{Error, Result};
pub use models::{Album, AlbumFields, Band, BandFields, BandSummary};
pub use validation::{ValidationError, Validator};
