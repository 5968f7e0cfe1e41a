// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the errors that can occur while parsing configuration text,
//! storing items, ingesting external sources, or interpreting stored values.
//! All errors use `thiserror` for proper error handling and conversion.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;
use thiserror::Error;

/// A structural error raised by the configuration text parser.
///
/// Records which token the parser expected and where the offending character
/// was found. Lines and columns are both 1-based; the column restarts at every
/// newline. When the input ends early the position is the last consumed
/// character.
///
/// # Examples
///
/// ```
/// use varcfg::domain::ParseError;
///
/// let err = ParseError::new("'='", 3, 7);
/// assert_eq!(err.expected(), "'='");
/// assert_eq!(err.line(), 3);
/// assert_eq!(err.column(), 7);
/// assert_eq!(err.to_string(), "line 3, column 7: expected '='");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line {line}, column {column}: expected {expected}")]
pub struct ParseError {
    expected: &'static str,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(expected: &'static str, line: usize, column: usize) -> Self {
        Self {
            expected,
            line,
            column,
        }
    }

    /// Returns a description of the token the parser expected.
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// Returns the 1-based line of the error.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 1-based column of the error.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when reading, parsing,
/// storing or accessing configuration values. It is marked as `#[non_exhaustive]`
/// to allow for future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use varcfg::domain::errors::ConfigError;
///
/// fn store_nothing() -> Result<(), ConfigError> {
///     Err(ConfigError::InvalidItem {
///         section: "database".to_string(),
///         name: String::new(),
///     })
/// }
///
/// assert!(matches!(store_nothing(), Err(ConfigError::InvalidItem { .. })));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration text contained an unexpected character.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] ParseError),

    /// An item was stored with a name that is empty after normalization.
    #[error("Invalid configuration item: empty name in section '{section}'")]
    InvalidItem {
        /// The normalized section the item was destined for
        section: String,
        /// The normalized (empty) item name
        name: String,
    },

    /// A prefix-matched environment variable had nothing left after the prefix.
    #[error("Invalid environment setting '{variable}': no item name after prefix")]
    InvalidEnvironment {
        /// The full name of the offending variable
        variable: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration source could not be opened or validated.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading or writing configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        ConfigError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Returns the structural parse error, if this is one.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
