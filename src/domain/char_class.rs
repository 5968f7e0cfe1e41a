// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character classification for the configuration grammar.
//!
//! Every input byte falls into exactly one [`CharClass`]. The parser's
//! transition tables and key normalization are both expressed in terms of
//! these classes rather than raw bytes.

/// The closed set of character categories the grammar distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Horizontal whitespace: space, tab, carriage return, vertical tab, form feed
    Space,
    /// `0-9`
    Numeric,
    /// `a-z` and `A-Z`
    Alpha,
    /// `-` and `_`
    Dash,
    /// `=`
    Eq,
    /// `"`
    Quote,
    /// `[`
    SquareOpen,
    /// `]`
    SquareClose,
    /// `#`
    Hash,
    /// `\`
    Escape,
    /// `\n`
    Eol,
    /// Anything else, including every byte of 0x80 and above
    Other,
}

impl CharClass {
    /// Returns true for the classes allowed in item names and normalized keys.
    pub fn is_key_char(self) -> bool {
        matches!(self, CharClass::Alpha | CharClass::Numeric | CharClass::Dash)
    }
}

/// Classifies a single byte.
///
/// Total over all byte values. `\n` is always [`CharClass::Eol`], never
/// [`CharClass::Space`]: the parser relies on it to terminate statements.
///
/// # Examples
///
/// ```
/// use varcfg::domain::{classify, CharClass};
///
/// assert_eq!(classify(b'\n'), CharClass::Eol);
/// assert_eq!(classify(b'\t'), CharClass::Space);
/// assert_eq!(classify(b'_'), CharClass::Dash);
/// assert_eq!(classify(0xe9), CharClass::Other);
/// ```
pub fn classify(b: u8) -> CharClass {
    match b {
        b'\n' => CharClass::Eol,
        b' ' | b'\t' | b'\r' | 0x0B | 0x0C => CharClass::Space,
        b'a'..=b'z' | b'A'..=b'Z' => CharClass::Alpha,
        b'0'..=b'9' => CharClass::Numeric,
        b'-' | b'_' => CharClass::Dash,
        b'=' => CharClass::Eq,
        b'"' => CharClass::Quote,
        b'[' => CharClass::SquareOpen,
        b']' => CharClass::SquareClose,
        b'#' => CharClass::Hash,
        b'\\' => CharClass::Escape,
        _ => CharClass::Other,
    }
}
