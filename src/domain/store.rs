// SPDX-License-Identifier: MIT OR Apache-2.0

//! The two-level configuration store.
//!
//! A [`ConfigStore`] maps section keys to item names to values. Every writer,
//! whether a parser, an ingestion adapter or application code, goes through
//! [`ConfigStore::set_item`], which normalizes keys, rejects empty names and
//! notifies observers.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::observer::{ConfigObserver, ObserverId};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Items of one section, in insertion order.
pub type Section = IndexMap<ConfigKey, ConfigValue>;

/// An insertion-ordered `section -> name -> value` store with change notification.
///
/// The store is mutated only through [`set_item`](Self::set_item), which takes
/// `&mut self`; the write and the observer calls that follow it therefore run
/// under one exclusive borrow. Share a store across threads by wrapping it in a
/// `RwLock` so the same holds for the write guard.
///
/// # Examples
///
/// ```
/// use varcfg::domain::ConfigStore;
///
/// # fn main() -> varcfg::domain::Result<()> {
/// let mut store = ConfigStore::new();
/// store.set_item("Network", "Port", "8080")?;
///
/// assert!(store.has_item("network", "port"));
/// assert_eq!(store.get("NETWORK", "PORT").as_str(), Some("8080"));
/// assert!(store.get("network", "missing").is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigStore {
    sections: IndexMap<ConfigKey, Section>,
    observers: Vec<(ObserverId, Arc<dyn ConfigObserver>)>,
    next_observer: u64,
}

impl ConfigStore {
    /// Creates an empty store with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value, or an empty text value if the item is absent.
    ///
    /// Use [`has_item`](Self::has_item) to tell an absent item from an empty one.
    pub fn get(&self, section: &str, name: &str) -> ConfigValue {
        self.find(section, name).cloned().unwrap_or_default()
    }

    /// Returns a reference to the stored value, if any.
    pub fn find(&self, section: &str, name: &str) -> Option<&ConfigValue> {
        self.sections
            .get(&ConfigKey::new(section))?
            .get(&ConfigKey::new(name))
    }

    /// Returns true if a value has been stored for the normalized pair.
    pub fn has_item(&self, section: &str, name: &str) -> bool {
        self.find(section, name).is_some()
    }

    /// Stores a value, replacing any previous value for the same pair.
    ///
    /// Both keys are normalized first. An item name that is empty after
    /// normalization is rejected with [`ConfigError::InvalidItem`] and the store
    /// is left untouched. On success every observer is notified.
    pub fn set_item(
        &mut self,
        section: &str,
        name: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<()> {
        let section = ConfigKey::new(section);
        let name = ConfigKey::new(name);

        if name.is_empty() {
            return Err(ConfigError::InvalidItem {
                section: section.into_string(),
                name: name.into_string(),
            });
        }

        self.sections
            .entry(section.clone())
            .or_default()
            .insert(name.clone(), value.into());

        self.notify(&section, &name);
        Ok(())
    }

    fn notify(&self, section: &ConfigKey, name: &ConfigKey) {
        for (id, observer) in &self.observers {
            if let Err(e) = observer.config_changed() {
                tracing::warn!("Observer {:?} failed on configuration change: {}", id, e);
            }
        }
        for (id, observer) in &self.observers {
            if let Err(e) = observer.item_changed(section, name) {
                tracing::warn!(
                    "Observer {:?} failed on change of [{}] {}: {}",
                    id,
                    section,
                    name,
                    e
                );
            }
        }
    }

    /// Registers an observer and returns a handle for removing it.
    pub fn register_observer(&mut self, observer: Arc<dyn ConfigObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes a previously registered observer. Returns false if it was unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Iterates over sections in insertion order.
    pub fn sections(&self) -> impl Iterator<Item = (&ConfigKey, &Section)> {
        self.sections.iter()
    }

    /// Returns the items of one section.
    pub fn section(&self, section: &str) -> Option<&Section> {
        self.sections.get(&ConfigKey::new(section))
    }

    /// Returns the total number of stored items.
    pub fn len(&self) -> usize {
        self.sections.values().map(IndexMap::len).sum()
    }

    /// Returns true if no item has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for ConfigStore {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("sections", &self.sections)
            .field("observers", &self.observers.len())
            .finish()
    }
}
