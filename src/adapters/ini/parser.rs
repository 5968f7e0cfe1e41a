// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI-style configuration parser.
//!
//! The grammar is line oriented:
//!
//! ```text
//! document   := (section | comment | assignment | blank)*
//! section    := '[' alnum* ']' eol
//! assignment := name ('=' | ws+ '=') ws* value (ws | eol | '#')
//! name       := (alnum | '-' | '_')+
//! value      := quoted | unquoted
//! quoted     := '"' ('\' any | [^"\])* '"'
//! comment    := '#' [^\n]* eol
//! ```
//!
//! Parsing is a byte-driven state machine. Each state has an exhaustive
//! transition table over [`CharClass`], and every completed item is committed
//! through [`ConfigStore::set_item`].

use crate::domain::{classify, CharClass, ConfigStore, ParseError, Result};
use crate::ports::ConfigParser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Start of a statement: name, section or comment
    ExpectName,
    Section,
    Name,
    Comment,
    ExpectEq,
    ExpectValue,
    Value,
    QuotedValue,
    /// After a complete statement, only whitespace or a comment may follow
    ExpectEol,
}

/// Parser for the INI-style configuration format.
///
/// # Examples
///
/// ```rust
/// use varcfg::adapters::ini::IniParser;
/// use varcfg::domain::ConfigStore;
/// use varcfg::ports::ConfigParser;
///
/// let mut store = ConfigStore::new();
/// let text = "name = top\n[server]\nhost = \"example.org\" # primary\nport = 8080";
/// IniParser::new().parse(text, &mut store).unwrap();
///
/// assert_eq!(store.get("", "name").as_str(), Some("top"));
/// assert_eq!(store.get("server", "host").as_str(), Some("example.org"));
/// assert_eq!(store.get("server", "port").as_str(), Some("8080"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniParser;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }
}

impl ConfigParser for IniParser {
    fn parse(&self, content: &str, store: &mut ConfigStore) -> Result<()> {
        self.parse_bytes(content.as_bytes(), store)
    }

    /// Runs the state machine over raw bytes.
    ///
    /// Bytes of 0x80 and above are [`CharClass::Other`], so text in any
    /// ASCII-compatible encoding parses; stored names and values are decoded
    /// as UTF-8 with invalid sequences replaced by U+FFFD.
    fn parse_bytes(&self, content: &[u8], store: &mut ConfigStore) -> Result<()> {
        let mut machine = Machine::new(store);
        for &b in content {
            machine.feed(b)?;
        }
        machine.finish()
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini", "conf", "cfg"]
    }
}

struct Machine<'a> {
    store: &'a mut ConfigStore,
    state: State,
    escaped: bool,
    line: usize,
    column: usize,
    section: Vec<u8>,
    name: Vec<u8>,
    value: Vec<u8>,
}

impl<'a> Machine<'a> {
    fn new(store: &'a mut ConfigStore) -> Self {
        Self {
            store,
            state: State::ExpectName,
            escaped: false,
            line: 1,
            column: 0,
            section: Vec::new(),
            name: Vec::new(),
            value: Vec::new(),
        }
    }

    fn error(&self, expected: &'static str) -> ParseError {
        ParseError::new(expected, self.line, self.column)
    }

    fn commit(&mut self) -> Result<()> {
        self.store.set_item(
            &String::from_utf8_lossy(&self.section),
            &String::from_utf8_lossy(&self.name),
            String::from_utf8_lossy(&self.value).into_owned(),
        )
    }

    fn feed(&mut self, b: u8) -> Result<()> {
        self.column += 1;
        self.step(b)?;
        if b == b'\n' {
            self.line += 1;
            self.column = 0;
        }
        Ok(())
    }

    fn step(&mut self, c: u8) -> Result<()> {
        use CharClass::*;

        let class = classify(c);
        match self.state {
            State::ExpectName => match class {
                Alpha | Numeric | Dash => {
                    self.name.clear();
                    self.name.push(c);
                    self.state = State::Name;
                }
                SquareOpen => {
                    self.section.clear();
                    self.state = State::Section;
                }
                Hash => self.state = State::Comment,
                Space | Eol => {}
                _ => return Err(self.error("item name").into()),
            },
            // Section names take alphanumerics only, unlike item names.
            State::Section => match class {
                Alpha | Numeric => self.section.push(c),
                SquareClose => self.state = State::ExpectEol,
                _ => return Err(self.error("']'").into()),
            },
            State::Name => match class {
                Alpha | Numeric | Dash => self.name.push(c),
                Eq => self.state = State::ExpectValue,
                Space => self.state = State::ExpectEq,
                _ => return Err(self.error("'='").into()),
            },
            State::Comment => {
                if class == Eol {
                    self.state = State::ExpectName;
                }
            }
            State::ExpectEq => match class {
                Space => {}
                Eq => self.state = State::ExpectValue,
                _ => return Err(self.error("'='").into()),
            },
            State::ExpectValue => match class {
                Alpha | Numeric | Dash => {
                    self.value.clear();
                    self.value.push(c);
                    self.state = State::Value;
                }
                Quote => {
                    self.value.clear();
                    self.state = State::QuotedValue;
                }
                Space => {}
                _ => return Err(self.error("value").into()),
            },
            State::Value => match class {
                Quote => return Err(self.error("value").into()),
                Space => {
                    self.commit()?;
                    self.state = State::ExpectEol;
                }
                Eol => {
                    self.commit()?;
                    self.state = State::ExpectName;
                }
                Hash => {
                    self.commit()?;
                    self.state = State::Comment;
                }
                _ => self.value.push(c),
            },
            State::QuotedValue => {
                if self.escaped {
                    self.value.push(c);
                    self.escaped = false;
                } else {
                    match class {
                        Quote => {
                            self.commit()?;
                            self.state = State::ExpectEol;
                        }
                        Escape => self.escaped = true,
                        _ => self.value.push(c),
                    }
                }
            }
            State::ExpectEol => match class {
                Hash => self.state = State::Comment,
                Eol => self.state = State::ExpectName,
                Space => {}
                _ => return Err(self.error("end of line").into()),
            },
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        match self.state {
            State::QuotedValue => Err(self.error("\"").into()),
            State::Value => self.commit(),
            // Incomplete statements at end of input are dropped without error.
            _ => Ok(()),
        }
    }
}
