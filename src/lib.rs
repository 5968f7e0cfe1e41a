// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture configuration store with an INI-style format.
//!
//! This crate keeps configuration as named items grouped into named sections.
//! Items can be read from INI-style text, from prefixed environment variables and
//! from command-line arguments, and the store can be written back out as INI text.
//! Observers are notified after every write.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and logic (`ConfigKey`, `ConfigValue`, `ConfigStore`, errors)
//! - **Ports**: Trait definitions that define interfaces (`ConfigParser`, `ConfigWriter`,
//!   `ConfigSource`, `ConfigObserver`)
//! - **Adapters**: Implementations for the INI format, environment variables and CLI arguments
//! - **Service**: The configuration service that orchestrates everything
//!
//! # Names
//!
//! Section and item names are normalized on every access: ASCII letters are
//! lowercased, digits, `-` and `_` are kept, and anything else becomes `_`. So
//! `Net.Main` and `net_main` are the same section.
//!
//! # Feature Flags
//!
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use varcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let mut service = ConfigService::new();
//! service.parse_str("[Server]\nHost = \"example.org\" # public name\nport = 8080\n")?;
//! service.get_cmdline(vec!["--server:port=9090"])?;
//!
//! assert_eq!(service.get("server", "host").as_str(), Some("example.org"));
//! assert_eq!(service.get("server", "port").as_i64("server.port")?, 9090);
//!
//! let mut out = Vec::new();
//! service.write_to_stream(&mut out)?;
//! assert_eq!(
//!     String::from_utf8(out)?,
//!     "\n[server]\n\nhost = \"example.org\"\nport = \"9090\"\n"
//! );
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigStore, ConfigValue, ParseError, Result,
    };
    pub use crate::ports::{ConfigObserver, ConfigParser, ConfigSource, ConfigWriter, ObserverId};
    pub use crate::service::{ConfigService, ConfigServiceBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::{CommandLineAdapter, ParameterLookup};
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarAdapter;
    pub use crate::adapters::{IniFileAdapter, IniParser, IniWriter};
}
