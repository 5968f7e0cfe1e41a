// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! This module provides the `ConfigValue` type, the unit of storage in a
//! [`ConfigStore`](crate::domain::ConfigStore). Every ingestion path produces
//! text; the typed variants exist for applications that store values
//! programmatically.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A single stored configuration value.
///
/// Values are kept uninterpreted until a typed accessor is called. The typed
/// accessors work on the textual rendering, so `Integer(1)` and `Text("1")`
/// convert identically.
///
/// # Examples
///
/// ```
/// use varcfg::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_str(), Some("42"));
/// assert_eq!(value.as_i32("test.key").unwrap(), 42);
///
/// let flag = ConfigValue::from(true);
/// assert_eq!(flag.to_string(), "true");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A boolean value
    Boolean(bool),
    /// A signed integer value
    Integer(i64),
    /// A floating point value
    Real(f64),
    /// Uninterpreted text, as produced by every parser and adapter
    Text(String),
}

impl ConfigValue {
    /// Creates a new text value.
    pub fn new(value: impl Into<String>) -> Self {
        ConfigValue::Text(value.into())
    }

    /// Returns the text if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the textual rendering of the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use varcfg::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from(7i64).as_string(), "7");
    /// ```
    pub fn as_string(&self) -> String {
        self.text().into_owned()
    }

    /// Returns true for empty text, which is also what absent items read as.
    pub fn is_empty(&self) -> bool {
        matches!(self, ConfigValue::Text(s) if s.is_empty())
    }

    fn text(&self) -> Cow<'_, str> {
        match self {
            ConfigValue::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    ///
    /// # Examples
    ///
    /// ```
    /// use varcfg::domain::config_value::ConfigValue;
    ///
    /// let value = ConfigValue::from("Yes");
    /// assert_eq!(value.as_bool("test.key").unwrap(), true);
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        if let ConfigValue::Boolean(b) = self {
            return Ok(*b);
        }
        let text = self.text();
        match text.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => text
                .parse::<bool>()
                .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.text()
            .parse::<i32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        if let ConfigValue::Integer(n) = self {
            return Ok(*n);
        }
        self.text()
            .parse::<i64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.text()
            .parse::<u32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.text()
            .parse::<u64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        if let ConfigValue::Real(x) = self {
            return Ok(*x);
        }
        self.text()
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use varcfg::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("test.key").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.text()
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl Default for ConfigValue {
    fn default() -> Self {
        ConfigValue::Text(String::new())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(n.into())
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        ConfigValue::Real(x)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Boolean(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Real(x) => write!(f, "{}", x),
            ConfigValue::Text(s) => f.write_str(s),
        }
    }
}
