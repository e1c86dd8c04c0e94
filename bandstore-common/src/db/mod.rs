//! Band document store
//!
//! Every operation takes the pool explicitly; the pool's lifecycle belongs
//! to the process entry point.

pub mod albums;
pub mod bands;
pub mod init;

pub use init::{init_database, init_in_memory};
