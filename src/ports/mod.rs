// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! between the store and the outside world. These traits are implemented by
//! adapters in the adapters layer.

pub mod observer;
pub mod parser;
pub mod source;
pub mod writer;

// Re-export commonly used types
pub use observer::{ConfigObserver, ObserverId};
pub use parser::ConfigParser;
pub use source::ConfigSource;
pub use writer::ConfigWriter;
