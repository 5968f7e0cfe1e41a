// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! parsing configuration text and loading the result into a store.

use crate::domain::{ConfigStore, Result};
use std::io::Read;

/// A trait for parsing configuration text into a [`ConfigStore`].
///
/// Parsers write through [`ConfigStore::set_item`] so every item they produce is
/// normalized and observed like any other write. A parser stops at the first
/// error; items committed before it stay in the store.
///
/// # Examples
///
/// ```rust
/// use varcfg::ports::ConfigParser;
/// use varcfg::domain::{ConfigStore, Result};
///
/// struct LineParser;
///
/// impl ConfigParser for LineParser {
///     fn parse(&self, content: &str, store: &mut ConfigStore) -> Result<()> {
///         for (i, line) in content.lines().enumerate() {
///             store.set_item("", &format!("line{}", i), line)?;
///         }
///         Ok(())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["txt"]
///     }
/// }
///
/// let mut store = ConfigStore::new();
/// LineParser.parse("a\nb", &mut store).unwrap();
/// assert_eq!(store.get("", "line1").as_str(), Some("b"));
/// ```
pub trait ConfigParser {
    /// Parses `content` and stores every item it defines.
    fn parse(&self, content: &str, store: &mut ConfigStore) -> Result<()>;

    /// Returns the file extensions supported by this parser, without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Parses raw bytes.
    ///
    /// The default decodes `content` as UTF-8, replacing invalid sequences with
    /// U+FFFD, and calls [`parse`](Self::parse). Byte-oriented parsers override it.
    fn parse_bytes(&self, content: &[u8], store: &mut ConfigStore) -> Result<()> {
        self.parse(&String::from_utf8_lossy(content), store)
    }

    /// Reads `reader` to the end and parses its content as bytes.
    fn parse_reader(&self, reader: &mut dyn Read, store: &mut ConfigStore) -> Result<()> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        self.parse_bytes(&content, store)
    }
}
