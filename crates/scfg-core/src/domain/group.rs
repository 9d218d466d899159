//! A named collection of entries.

use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;
use tracing::warn;

use super::entry::Entry;
use super::error::StoreError;
use super::value::Value;

/// A named collection of [`Entry`] values, keyed by entry name.
///
/// Entries are kept sorted by name so that encoding is deterministic; the
/// order carries no meaning in the text format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Group {
    #[serde(skip)]
    name: String,
    entries: BTreeMap<String, Entry>,
}

impl Group {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            entries: BTreeMap::new(),
        }
    }

    /// The group name, unique within its config.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an entry and returns a reference to it.
    ///
    /// An existing entry with the same name is replaced (last write wins) and
    /// a warning is logged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scfg_core::Config;
    ///
    /// let mut config = Config::new();
    /// let net = config.add_group("net");
    /// net.add_entry("port", 8080u32);
    /// net.add_entry("host", "localhost");
    ///
    /// assert_eq!(net.entry("port").unwrap().get::<u32>(), Ok(8080));
    /// ```
    pub fn add_entry(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Entry {
        let name = name.into();
        let entry = Entry::new(name.clone(), value.into());
        match self.entries.entry(name) {
            btree_map::Entry::Occupied(mut slot) => {
                warn!(
                    group = %self.name,
                    entry = %slot.key(),
                    "replacing existing entry"
                );
                slot.insert(entry);
                slot.into_mut()
            }
            btree_map::Entry::Vacant(slot) => slot.insert(entry),
        }
    }

    /// Looks up an entry by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if no entry has this name.
    pub fn entry(&self, name: &str) -> Result<&Entry, StoreError> {
        self.entries
            .get(name)
            .ok_or_else(|| self.entry_not_found(name))
    }

    /// Looks up an entry by exact name for modification.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if no entry has this name.
    pub fn entry_mut(&mut self, name: &str) -> Result<&mut Entry, StoreError> {
        let group = &self.name;
        self.entries
            .get_mut(name)
            .ok_or_else(|| StoreError::EntryNotFound {
                group: group.clone(),
                entry: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates over the entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_not_found(&self, name: &str) -> StoreError {
        StoreError::EntryNotFound {
            group: self.name.clone(),
            entry: name.to_string(),
        }
    }
}
