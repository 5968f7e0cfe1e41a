// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalized configuration key newtype.
//!
//! This module provides the `ConfigKey` type used for both section keys and item
//! names. Every constructor normalizes its input, so a `ConfigKey` that exists
//! is always in canonical form.

use crate::domain::char_class::classify;
use std::fmt;

/// A normalized section key or item name.
///
/// Normalization lower-cases ASCII letters and replaces every character that is
/// not alphanumeric, `-` or `_` with `_`. The result only ever contains
/// `[a-z0-9_-]`, and normalizing an already normalized key is a no-op.
///
/// The empty key is valid: it names the default section.
///
/// # Examples
///
/// ```
/// use varcfg::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("Database.Host");
/// assert_eq!(key.as_str(), "database_host");
///
/// let section = ConfigKey::from("");
/// assert!(section.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a normalized key from raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use varcfg::domain::config_key::ConfigKey;
    ///
    /// let key = ConfigKey::new("Log Level");
    /// assert_eq!(key.as_str(), "log_level");
    /// ```
    pub fn new(raw: &str) -> Self {
        ConfigKey(Self::normalize(raw))
    }

    /// Returns the normalized form of `raw` without wrapping it.
    pub fn normalize(raw: &str) -> String {
        raw.chars()
            .map(|c| {
                if c.is_ascii() && classify(c as u8).is_key_char() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the default-section key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey::new(&s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey::new(s)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
