// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, which is the primary port (interface)
//! for ingesting configuration from outside the process: files, environment
//! variables, command-line arguments. A source loads itself into a store through
//! the same item-writing path as every other writer.

use crate::domain::{ConfigStore, Result};

/// A trait for configuration sources.
///
/// # Priority
///
/// Each source has a priority value (0-255). When a service loads several sources
/// it applies them in ascending priority, so under last-write-wins the source with
/// the highest priority decides the final value of a shared item. The typical
/// priority values are:
///
/// - **3 (highest)**: Command-line arguments
/// - **2**: Environment variables
/// - **1 (lowest)**: Configuration files
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use varcfg::ports::ConfigSource;
/// use varcfg::domain::{ConfigStore, Result};
///
/// struct FixedSource;
///
/// impl ConfigSource for FixedSource {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn load_into(&self, store: &mut ConfigStore) -> Result<()> {
///         store.set_item("app", "name", "demo")
///     }
/// }
///
/// let mut store = ConfigStore::new();
/// FixedSource.load_into(&mut store).unwrap();
/// assert!(store.has_item("app", "name"));
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns the name of this configuration source.
    ///
    /// This name is used for logging and error messages. It should be a short,
    /// descriptive identifier like "env", "ini-file" or "cli".
    fn name(&self) -> &str;

    /// Returns the priority of this configuration source.
    fn priority(&self) -> u8;

    /// Writes every item this source provides into `store`.
    ///
    /// Loading stops at the first error; items written before it stay.
    fn load_into(&self, store: &mut ConfigStore) -> Result<()>;
}
