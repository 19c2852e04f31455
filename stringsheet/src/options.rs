//! Options shared by every stage of the conversion pipeline.

use crate::error::Error;

/// Column separator used when none is given.
pub const DEFAULT_SEPARATOR: u8 = b'\t';

/// Cell text that marks a row as not translatable.
pub const NOT_TRANSLATABLE: &str = "not-translatable";

/// Characters the table format reserves for itself and therefore cannot
/// separate columns.
const RESERVED_SEPARATORS: [char; 5] = ['\n', '\r', ';', '=', '%'];

/// Table layout options for [`crate::Codec`] and the format parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Byte separating the columns of one row.
    pub separator: u8,
    /// Sentinel written to every language column of a non-translatable row.
    pub not_translatable: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            not_translatable: NOT_TRANSLATABLE.to_string(),
        }
    }
}

impl TableOptions {
    /// Creates default table options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column separator byte.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the column separator from a character, rejecting anything that is
    /// not a single ASCII character or that the table format uses itself.
    pub fn with_separator_char(self, separator: char) -> Result<Self, Error> {
        if !separator.is_ascii() {
            return Err(Error::InvalidOptions(format!(
                "separator must be a single ASCII character, got {:?}",
                separator
            )));
        }
        if RESERVED_SEPARATORS.contains(&separator) {
            return Err(Error::InvalidOptions(format!(
                "{:?} cannot be used as a separator",
                separator
            )));
        }
        Ok(self.with_separator(separator as u8))
    }

    /// Sets the not-translatable sentinel.
    pub fn with_not_translatable(mut self, sentinel: impl Into<String>) -> Self {
        self.not_translatable = sentinel.into();
        self
    }

    /// The separator as a character.
    pub fn separator_char(&self) -> char {
        self.separator as char
    }
}
