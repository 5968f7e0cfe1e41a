// SPDX-License-Identifier: MIT OR Apache-2.0

//! The INI-style text format: parser, writer and file source.

pub mod file;
pub mod parser;
pub mod writer;

pub use file::{default_config_dir, write_file, IniFileAdapter};
pub use parser::IniParser;
pub use writer::IniWriter;
