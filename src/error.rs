//! Error types for CSV reading

use thiserror::Error;

/// Result type alias for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors raised while reading CSV records
#[derive(Error, Debug)]
pub enum CsvError {
    /// A quoted field was opened and the input ended before it was closed
    #[error("unterminated quoted field in record starting at line {line}")]
    UnterminatedQuote {
        /// Physical line (1-based) where the unfinished record began
        line: u64,
    },

    /// A quoted field spanned more physical lines than the configured limit
    #[error("record starting at line {line} spans more than {limit} lines")]
    MultilineLimitExceeded {
        /// Configured maximum number of physical lines per record
        limit: usize,
        /// Physical line (1-based) where the record began
        line: u64,
    },

    /// A read was attempted after the reader was closed
    #[error("reader is closed")]
    ReaderClosed,

    /// Parser configuration is not usable
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure reported by the underlying line source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CsvError {
    /// Whether the error was caused by malformed CSV input
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            CsvError::UnterminatedQuote { .. } | CsvError::MultilineLimitExceeded { .. }
        )
    }
}
