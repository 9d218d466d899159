//! In-memory configuration model.
//!
//! This module contains the data types only; it knows nothing about files or
//! the text format.
//!
//! # Ownership tree (for beginners)
//!
//! ```text
//! Config ──owns──▶ Group ──owns──▶ Entry ──owns──▶ Value
//! ```
//!
//! Every level is keyed by an owned `String`, so nothing in the tree borrows
//! from the caller.  Children are created with an `add_*` method on their
//! parent, which returns `&mut` to the freshly inserted child.  Lookups
//! (`group`, `entry`) never create anything: a miss is a
//! [`StoreError`], not an empty placeholder.

pub mod config;
pub mod entry;
pub mod error;
pub mod group;
pub mod value;

pub use config::Config;
pub use entry::Entry;
pub use error::{ParseValueError, StoreError};
pub use group::Group;
pub use value::{Primitive, Value, ValueType};
