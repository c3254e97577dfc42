//! # csvstream
//!
//! Streaming CSV reader that turns a line-oriented character source into
//! records of field strings, one record at a time.
//!
//! ## Features
//!
//! - **Quoted fields**: delimiters, doubled quotes and line breaks inside quotes
//! - **Multi-line records**: a quoted field may span any number of physical lines
//! - **Constant memory**: only the record in progress is buffered
//! - **Configurable**: delimiter, quote character, leading-line skip, multi-line limit
//! - **Malformed input surfaces as errors**: an unterminated quote is never a partial record
//!
//! ## Quick Start
//!
//! ```
//! use csvstream::CsvReader;
//!
//! let data = "id,comment\n1,\"hello, world\"\n2,\"multi\nline\"\n";
//! let mut reader = CsvReader::from_reader(data.as_bytes());
//!
//! let records = reader.read_all().unwrap();
//! assert_eq!(records.len(), 3);
//! assert_eq!(records[1], vec!["1", "hello, world"]);
//! assert_eq!(records[2], vec!["2", "multi\nline"]);
//! ```
//!
//! ## Custom configuration
//!
//! ```
//! use csvstream::{CsvReader, ParserConfig};
//! use csvstream::source::LineReader;
//!
//! let config = ParserConfig::default()
//!     .with_delimiter(';')
//!     .with_quote_char('\'')
//!     .with_skip_lines(1);
//!
//! let source = LineReader::new("a;b\n'x;y';z".as_bytes());
//! let mut reader = CsvReader::with_config(source, config).unwrap();
//!
//! assert_eq!(reader.read_next().unwrap().unwrap(), vec!["x;y", "z"]);
//! assert_eq!(reader.lines_read(), 2);
//! ```

pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod source;
pub mod types;

pub use csv_reader::{CsvReader, CsvRecordIterator, FileCsvReader};
pub use error::{CsvError, Result};
pub use source::{IterLines, LineReader, LineSource};
pub use types::{ParserConfig, Record};
