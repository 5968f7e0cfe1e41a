// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration observer trait definition.
//!
//! This module defines the `ConfigObserver` trait, which lets callers be notified
//! synchronously whenever an item is written to a
//! [`ConfigStore`](crate::domain::ConfigStore).

use crate::domain::{ConfigKey, Result};

/// Handle returned when an observer is registered, used to remove it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// A listener for configuration changes.
///
/// After every successful item write the store calls `config_changed` on all
/// registered observers, then `item_changed` on all of them, each time in
/// registration order. Both methods default to doing nothing, so an observer
/// only implements what it cares about.
///
/// Returning an error does not undo the write; the store logs it and carries
/// on with the remaining observers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so stores can be shared behind a lock.
///
/// # Examples
///
/// ```rust
/// use varcfg::ports::ConfigObserver;
/// use varcfg::domain::{ConfigKey, Result};
///
/// struct PrintObserver;
///
/// impl ConfigObserver for PrintObserver {
///     fn item_changed(&self, section: &ConfigKey, name: &ConfigKey) -> Result<()> {
///         println!("[{}] {} changed", section, name);
///         Ok(())
///     }
/// }
/// ```
pub trait ConfigObserver: Send + Sync {
    /// Called once per write, without saying what changed.
    fn config_changed(&self) -> Result<()> {
        Ok(())
    }

    /// Called once per write with the normalized section and item name.
    fn item_changed(&self, _section: &ConfigKey, _name: &ConfigKey) -> Result<()> {
        Ok(())
    }
}
