use thiserror::Error;

use super::value::ValueType;

/// Errors raised by lookups and typed access on the in-memory store.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// No group with this name exists in the config.
    #[error("group not found: [{0}]")]
    GroupNotFound(String),

    /// The group exists but holds no entry with this name.
    #[error("entry not found: [{group}] {entry}")]
    EntryNotFound { group: String, entry: String },

    /// Typed access asked for a different type than the one stored.
    #[error("type mismatch: requested {expected}, entry holds {actual}")]
    TypeMismatch {
        expected: ValueType,
        actual: ValueType,
    },
}

/// Text that does not parse as the requested value type.
#[derive(Debug, Error, PartialEq)]
#[error("invalid {value_type} value {raw:?}: {reason}")]
pub struct ParseValueError {
    pub value_type: ValueType,
    pub raw: String,
    pub reason: String,
}
