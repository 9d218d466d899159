//! Storage: config file persistence.
//!
//! A thin adapter between [`crate::Config`] and the file system.  The text
//! format itself lives in [`crate::format`]; this module only moves bytes
//! and attaches the file path to errors.

pub mod file;

pub use file::{load_config, save_config, StorageError};
