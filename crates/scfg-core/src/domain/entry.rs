//! A single named value.

use serde::Serialize;

use super::error::StoreError;
use super::value::{Primitive, Value, ValueType};

/// A named wrapper around one [`Value`].
///
/// Entries are created through [`crate::Group::add_entry`]; the name is fixed
/// for the lifetime of the entry, the value can be replaced freely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Entry {
    #[serde(skip)]
    name: String,
    value: Value,
}

impl Entry {
    pub(crate) fn new(name: String, value: Value) -> Self {
        Self { name, value }
    }

    /// The entry name, unique within its group.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    /// Returns a copy of the stored value as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TypeMismatch`] if the entry holds another type.
    pub fn get<T: Primitive>(&self) -> Result<T, StoreError> {
        self.value.get()
    }

    /// Returns a mutable reference to the stored value as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TypeMismatch`] if the entry holds another type.
    pub fn get_mut<T: Primitive>(&mut self) -> Result<&mut T, StoreError> {
        self.value.get_mut()
    }

    /// Replaces the stored value.  The entry may change type.
    pub fn set(&mut self, value: impl Into<Value>) {
        self.value.set(value);
    }
}
