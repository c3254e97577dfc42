//! Record and parser configuration types

use crate::error::{CsvError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A logical CSV record: field strings in left-to-right order
pub type Record = Vec<String>;

/// Parser configuration
///
/// Immutable once handed to a [`CsvReader`](crate::CsvReader).
///
/// # Examples
///
/// ```
/// use csvstream::ParserConfig;
///
/// let config = ParserConfig::default()
///     .with_delimiter(';')
///     .with_skip_lines(1);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.quote_char, '"');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Character separating fields
    pub delimiter: char,
    /// Character that opens and closes quoted fields
    pub quote_char: char,
    /// Leading physical lines discarded before the first record
    pub skip_lines: usize,
    /// Maximum physical lines a single record may span (`None` = unlimited)
    pub multiline_limit: Option<usize>,
    /// Keep a trailing `\r` on each physical line instead of stripping it
    pub keep_carriage_return: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            skip_lines: 0,
            multiline_limit: None,
            keep_carriage_return: false,
        }
    }
}

impl ParserConfig {
    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    pub fn with_quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Set the number of leading physical lines to discard
    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Limit how many physical lines one record may span
    pub fn with_multiline_limit(mut self, limit: usize) -> Self {
        self.multiline_limit = Some(limit);
        self
    }

    /// Keep trailing carriage returns on physical lines
    pub fn with_keep_carriage_return(mut self, keep: bool) -> Self {
        self.keep_carriage_return = keep;
        self
    }

    /// Check that the configuration can drive a parser
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quote_char {
            return Err(CsvError::InvalidConfig(format!(
                "delimiter and quote character are both {:?}",
                self.delimiter
            )));
        }

        for (name, ch) in [("delimiter", self.delimiter), ("quote character", self.quote_char)] {
            if ch == '\n' || ch == '\r' {
                return Err(CsvError::InvalidConfig(format!(
                    "{} cannot be a line terminator ({:?})",
                    name, ch
                )));
            }
        }

        if self.multiline_limit == Some(0) {
            return Err(CsvError::InvalidConfig(
                "multiline limit must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
