// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration writer trait definition.
//!
//! The inverse of [`ConfigParser`](crate::ports::ConfigParser): renders a store
//! back to text.

use crate::domain::{ConfigError, ConfigStore, Result};
use std::io::Write;

/// A trait for serializing a [`ConfigStore`].
///
/// The only failure a writer reports is the destination refusing output.
pub trait ConfigWriter {
    /// Writes every section and item of `store` to `out`.
    fn write(&self, store: &ConfigStore, out: &mut dyn Write) -> Result<()>;

    /// Renders `store` into a `String`.
    fn write_to_string(&self, store: &ConfigStore) -> Result<String> {
        let mut buf = Vec::new();
        self.write(store, &mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| ConfigError::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}
