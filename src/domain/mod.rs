// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the core domain types of the configuration engine: the
//! character classes of the grammar, normalized keys, values, the store and
//! the error types. It does no I/O.

pub mod char_class;
pub mod config_key;
pub mod config_value;
pub mod errors;
pub mod store;

// Re-export commonly used types
pub use char_class::{classify, CharClass};
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use errors::{ConfigError, ParseError, Result};
pub use store::{ConfigStore, Section};
