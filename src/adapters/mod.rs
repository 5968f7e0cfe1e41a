// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing format and source implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: the INI text format, and the sources that feed a store from
//! files, environment variables and command-line arguments.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod ini;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::{CommandLineAdapter, Parameter, ParameterLookup};
#[cfg(feature = "env")]
pub use env_var::EnvVarAdapter;
pub use ini::{IniFileAdapter, IniParser, IniWriter};
