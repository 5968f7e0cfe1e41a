// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration service.
//!
//! `ConfigService` ties a store to the INI format and to the external sources,
//! and `ConfigServiceBuilder` assembles one from prioritized sources.

pub mod config_service;

// Re-export commonly used types
pub use config_service::{ConfigService, ConfigServiceBuilder};
