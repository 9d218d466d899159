//! The root of the ownership tree: a named set of groups.

use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;
use tracing::warn;

use super::entry::Entry;
use super::error::StoreError;
use super::group::Group;

/// A collection of [`Group`]s keyed by group name.
///
/// `Config` owns every group, every group owns its entries; dropping the
/// config drops the whole tree.  Persistence lives in
/// [`crate::storage`] (`save` / `load`) and [`crate::format`] (`to_text` /
/// `from_text`).
///
/// Serializes as a JSON-style map: `{group: {entry: {type, value}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Config {
    groups: BTreeMap<String, Group>,
}

impl Config {
    /// Creates an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty group and returns a reference to it.
    ///
    /// An existing group with the same name is replaced by the new, empty
    /// group (last write wins) and a warning is logged.
    pub fn add_group(&mut self, name: impl Into<String>) -> &mut Group {
        let name = name.into();
        let group = Group::new(name.clone());
        match self.groups.entry(name) {
            btree_map::Entry::Occupied(mut slot) => {
                warn!(
                    group = %slot.key(),
                    dropped_entries = slot.get().len(),
                    "replacing existing group"
                );
                slot.insert(group);
                slot.into_mut()
            }
            btree_map::Entry::Vacant(slot) => slot.insert(group),
        }
    }

    /// Returns the named group, creating it only if it does not exist yet.
    ///
    /// Used by the decoder so that a repeated `[name]` header continues the
    /// earlier group instead of discarding it.
    pub(crate) fn select_group(&mut self, name: &str) -> &mut Group {
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name.to_string()))
    }

    /// Looks up a group by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupNotFound`] if no group has this name.
    pub fn group(&self, name: &str) -> Result<&Group, StoreError> {
        self.groups
            .get(name)
            .ok_or_else(|| StoreError::GroupNotFound(name.to_string()))
    }

    /// Looks up a group by exact name for modification.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupNotFound`] if no group has this name.
    pub fn group_mut(&mut self, name: &str) -> Result<&mut Group, StoreError> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| StoreError::GroupNotFound(name.to_string()))
    }

    /// Looks up an entry by group and entry name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupNotFound`] or [`StoreError::EntryNotFound`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scfg_core::{Config, StoreError};
    ///
    /// let mut config = Config::new();
    /// config.add_group("net").add_entry("port", 8080u32);
    ///
    /// assert_eq!(config.entry("net", "port").unwrap().get::<u32>(), Ok(8080));
    /// assert!(matches!(config.entry("disk", "port"), Err(StoreError::GroupNotFound(_))));
    /// ```
    pub fn entry(&self, group: &str, entry: &str) -> Result<&Entry, StoreError> {
        self.group(group)?.entry(entry)
    }

    /// Looks up an entry by group and entry name for modification.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::GroupNotFound`] or [`StoreError::EntryNotFound`].
    pub fn entry_mut(&mut self, group: &str, entry: &str) -> Result<&mut Entry, StoreError> {
        self.group_mut(group)?.entry_mut(entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Iterates over the groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of entries across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Group::len).sum()
    }
}
