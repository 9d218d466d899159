//! # scfg-core
//!
//! A small typed key-value configuration store with a human-readable text
//! format.
//!
//! A [`Config`] holds named [`Group`]s; a group holds named [`Entry`]s; an
//! entry holds one [`Value`] of a fixed set of primitive types (`i32`, `i64`,
//! `u32`, `u64`, `f32`, `f64`, `String`).  The whole tree round-trips to a
//! text file:
//!
//! ```text
//! [net]
//! host: localhost -> str
//! port: 8080 -> u32
//!
//! ```
//!
//! # Architecture overview
//!
//! - **`domain`** – The in-memory model: the value union, typed access, and
//!   the group/entry containers.  No I/O.
//!
//! - **`format`** – The text codec (`encode_config` / `decode_config`) and
//!   the [`CodecTrace`] hook the codec reports its progress to.
//!
//! - **`storage`** – Reads and writes files, attaching the path to errors.
//!   Provides [`Config::save`] and [`Config::load`].
//!
//! # Example
//!
//! ```rust
//! use scfg_core::Config;
//!
//! let mut config = Config::new();
//! let net = config.add_group("net");
//! net.add_entry("port", 8080u32);
//! net.add_entry("host", "localhost");
//!
//! let restored = Config::from_text(&config.to_text().unwrap()).unwrap();
//! assert_eq!(restored.entry("net", "port").unwrap().get::<u32>(), Ok(8080));
//! assert_eq!(restored, config);
//! ```

pub mod domain;
pub mod format;
pub mod storage;

// Re-export the most-used types at the crate root so callers can write
// `scfg_core::Config` instead of `scfg_core::domain::config::Config`.
pub use domain::{Config, Entry, Group, ParseValueError, Primitive, StoreError, Value, ValueType};
pub use format::{
    decode_config, encode_config, CodecTrace, EncodeError, FormatError, TracingTrace,
};
pub use storage::StorageError;
