//! CSV tokenizing

mod parser;

pub use parser::{CsvParser, ParseState, PendingRecord, Tokenized};
