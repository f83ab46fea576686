//! Visual frame of the bar.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// The begin, fill and end glyphs of a bar, e.g. `|=|` renders as `|=====     |`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Borders {
    /// Left border glyph.
    pub begin: char,
    /// Glyph drawn for every filled cell.
    pub fill: char,
    /// Right border glyph.
    pub end: char,
}

impl Borders {
    /// The format used when none is given.
    pub const DEFAULT_FORMAT: &'static str = "|=|";

    /// Creates a border triple from its three glyphs.
    #[must_use]
    pub const fn new(begin: char, fill: char, end: char) -> Self {
        Self { begin, fill, end }
    }

    /// Parses a three character format, panicking on anything else.
    ///
    /// A malformed format is a programming error rather than a runtime condition,
    /// so constructors that take a raw format string fail fast through this.
    ///
    /// # Panics
    ///
    /// Panics if `format` is not exactly three characters long.
    #[must_use]
    pub fn from_format(format: &str) -> Self {
        match format.parse() {
            Ok(borders) => borders,
            Err(e) => panic!("{e}"),
        }
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::new('|', '=', '|')
    }
}

impl FromStr for Borders {
    type Err = Error;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        let mut chars = format.chars();
        match (chars.next(), chars.next(), chars.next(), chars.next()) {
            (Some(begin), Some(fill), Some(end), None) => Ok(Self::new(begin, fill, end)),
            _ => Err(Error::invalid_borders(format)),
        }
    }
}

impl fmt::Display for Borders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.begin, self.fill, self.end)
    }
}
