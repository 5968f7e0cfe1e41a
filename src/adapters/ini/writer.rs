// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI-style configuration writer.

use crate::domain::{ConfigStore, Result};
use crate::ports::ConfigWriter;
use std::io::Write;

/// Renders a store in the format read by [`IniParser`](super::IniParser).
///
/// Each section is written as a blank line, `[section]`, another blank line and
/// then one `name = "value"` line per item. Values are wrapped in double quotes
/// verbatim, so text containing `"` or `\` does not read back unchanged. The
/// default section is written as `[]`.
///
/// # Examples
///
/// ```rust
/// use varcfg::adapters::ini::IniWriter;
/// use varcfg::domain::ConfigStore;
/// use varcfg::ports::ConfigWriter;
///
/// let mut store = ConfigStore::new();
/// store.set_item("server", "host", "localhost").unwrap();
///
/// let text = IniWriter::new().write_to_string(&store).unwrap();
/// assert_eq!(text, "\n[server]\n\nhost = \"localhost\"\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniWriter;

impl IniWriter {
    /// Creates a new INI writer.
    pub fn new() -> Self {
        IniWriter
    }
}

impl ConfigWriter for IniWriter {
    fn write(&self, store: &ConfigStore, out: &mut dyn Write) -> Result<()> {
        for (section, items) in store.sections() {
            write!(out, "\n[{}]\n\n", section)?;
            for (name, value) in items {
                writeln!(out, "{} = \"{}\"", name, value)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ini::IniParser;
    use crate::domain::ConfigError;
    use crate::ports::ConfigParser;
    use std::io;

    #[test]
    fn test_write_empty_store() {
        let store = ConfigStore::new();
        assert_eq!(IniWriter::new().write_to_string(&store).unwrap(), "");
    }

    #[test]
    fn test_write_sections_in_insertion_order() {
        let mut store = ConfigStore::new();
        store.set_item("", "top", "1").unwrap();
        store.set_item("b", "x", "2").unwrap();
        store.set_item("a", "y", "3").unwrap();
        store.set_item("b", "z", 4i64).unwrap();

        let text = IniWriter::new().write_to_string(&store).unwrap();
        assert_eq!(
            text,
            "\n[]\n\ntop = \"1\"\n\n[b]\n\nx = \"2\"\nz = \"4\"\n\n[a]\n\ny = \"3\"\n"
        );
    }

    #[test]
    fn test_write_does_not_escape() {
        let mut store = ConfigStore::new();
        store.set_item("", "k", "say \"hi\"").unwrap();

        let text = IniWriter::new().write_to_string(&store).unwrap();
        assert!(text.contains("k = \"say \"hi\"\"\n"));
    }

    #[test]
    fn test_output_parses_back() {
        let mut store = ConfigStore::new();
        store.set_item("", "name", "my app").unwrap();
        store.set_item("net", "listen", "0.0.0.0:80").unwrap();
        store.set_item("net", "banner", "").unwrap();

        let text = IniWriter::new().write_to_string(&store).unwrap();
        let mut reread = ConfigStore::new();
        IniParser::new().parse(&text, &mut reread).unwrap();

        assert_eq!(store, reread);
    }

    struct BrokenSink;

    impl io::Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unwritable_destination() {
        let mut store = ConfigStore::new();
        store.set_item("s", "k", "v").unwrap();

        let err = IniWriter::new().write(&store, &mut BrokenSink).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
