//! Line tokenizer with RFC 4180-like quoting
//!
//! The tokenizer sees one physical line at a time. A quoted field left open at the
//! end of a line is handed back as a [`PendingRecord`] so the caller can feed it the
//! next physical line; the line break becomes a literal `\n` inside the field.

use crate::error::{CsvError, Result};
use crate::types::{ParserConfig, Record};

/// Tokenizer state carried between physical lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParseState {
    /// No record in progress
    #[default]
    Idle,
    /// A record whose last field is an open quoted field
    Pending(PendingRecord),
}

impl ParseState {
    /// Whether a record is waiting for more physical lines
    pub fn is_pending(&self) -> bool {
        matches!(self, ParseState::Pending(_))
    }

    /// The in-progress record, if any
    pub fn pending(&self) -> Option<&PendingRecord> {
        match self {
            ParseState::Pending(record) => Some(record),
            ParseState::Idle => None,
        }
    }
}

/// A record spanning more than one physical line, with its quote still open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    fields: Vec<String>,
    field: String,
    lines: usize,
}

impl PendingRecord {
    /// Fields already closed out
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Accumulated text of the open quoted field, including line breaks
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Physical lines consumed by this record so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Drop the accumulated text, keeping only the open quote and the line count
    pub(crate) fn discard(self) -> Self {
        PendingRecord {
            fields: Vec::new(),
            field: String::new(),
            lines: self.lines,
        }
    }
}

/// Outcome of tokenizing one physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized {
    /// The logical record is finished
    Complete(Record),
    /// A quoted field is still open; feed the next physical line
    Pending(PendingRecord),
}

impl Tokenized {
    /// Whether the logical record is finished
    pub fn is_complete(&self) -> bool {
        matches!(self, Tokenized::Complete(_))
    }
}

/// CSV tokenizer for splitting lines into fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvParser {
    delimiter: char,
    quote_char: char,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(',', '"')
    }
}

impl CsvParser {
    /// Create a new CSV parser with custom delimiter and quote character
    pub fn new(delimiter: char, quote_char: char) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    /// Create a parser using the delimiter and quote character of `config`
    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.delimiter, config.quote_char)
    }

    /// Tokenize one physical line, continuing `state` if a record is in progress
    ///
    /// A quote opens a quoted field only at the start of a field; anywhere else it
    /// is a literal character. Inside a quoted field a doubled quote is an escaped
    /// literal quote.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::csv::{CsvParser, ParseState, Tokenized};
    ///
    /// let parser = CsvParser::default();
    ///
    /// let pending = match parser.tokenize_line("\"a", ParseState::Idle) {
    ///     Tokenized::Pending(pending) => pending,
    ///     Tokenized::Complete(_) => unreachable!(),
    /// };
    ///
    /// let done = parser.tokenize_line("b\",c", ParseState::Pending(pending));
    /// assert_eq!(done, Tokenized::Complete(vec!["a\nb".to_string(), "c".to_string()]));
    /// ```
    pub fn tokenize_line(&self, line: &str, state: ParseState) -> Tokenized {
        let (mut fields, mut field, mut in_quotes, lines) = match state {
            ParseState::Idle => (Vec::new(), String::new(), false, 0),
            ParseState::Pending(record) => (record.fields, record.field, true, record.lines),
        };
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if in_quotes {
                if ch == self.quote_char {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&self.quote_char) {
                        field.push(self.quote_char);
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(ch);
                }
            } else if ch == self.quote_char && field.is_empty() {
                in_quotes = true;
            } else if ch == self.delimiter {
                fields.push(std::mem::take(&mut field));
            } else {
                field.push(ch);
            }
        }

        if in_quotes {
            field.push('\n');
            Tokenized::Pending(PendingRecord {
                fields,
                field,
                lines: lines + 1,
            })
        } else {
            fields.push(field);
            Tokenized::Complete(fields)
        }
    }

    /// Parse the full text of one logical record
    ///
    /// Embedded newlines inside quoted fields are kept as they appear in `text`.
    pub fn parse_line(&self, text: &str) -> Result<Record> {
        match self.tokenize_line(text, ParseState::Idle) {
            Tokenized::Complete(record) => Ok(record),
            Tokenized::Pending(_) => Err(CsvError::UnterminatedQuote { line: 1 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(outcome: Tokenized) -> PendingRecord {
        match outcome {
            Tokenized::Pending(record) => record,
            Tokenized::Complete(record) => panic!("expected pending record, got {:?}", record),
        }
    }

    #[test]
    fn test_simple() {
        let parser = CsvParser::new(',', '"');
        assert_eq!(parser.parse_line("a,b,c").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted() {
        let parser = CsvParser::new(',', '"');
        assert_eq!(parser.parse_line(r#""a,b",c"#).unwrap(), vec!["a,b", "c"]);
    }

    #[test]
    fn test_escaped_quotes() {
        let parser = CsvParser::default();
        assert_eq!(
            parser.parse_line(r#""Say ""Hello""",world"#).unwrap(),
            vec![r#"Say "Hello""#, "world"]
        );
    }

    #[test]
    fn test_empty_fields() {
        let parser = CsvParser::default();
        assert_eq!(parser.parse_line("a,,c").unwrap(), vec!["a", "", "c"]);
        assert_eq!(parser.parse_line(",,").unwrap(), vec!["", "", ""]);
    }

    #[test]
    fn test_empty_line() {
        let parser = CsvParser::default();
        assert_eq!(parser.parse_line("").unwrap(), vec![""]);
    }

    #[test]
    fn test_quoted_empty() {
        let parser = CsvParser::default();
        assert_eq!(parser.parse_line(r#""","""#).unwrap(), vec!["", ""]);
    }

    #[test]
    fn test_embedded_newline_in_text() {
        let parser = CsvParser::default();
        assert_eq!(
            parser.parse_line("\"Line 1\nLine 2\",normal").unwrap(),
            vec!["Line 1\nLine 2", "normal"]
        );
    }

    #[test]
    fn test_custom_delimiter_and_quote() {
        let parser = CsvParser::new(';', '\'');
        assert_eq!(
            parser.parse_line("a;'b;c';'it''s'").unwrap(),
            vec!["a", "b;c", "it's"]
        );
    }

    #[test]
    fn test_mid_field_quote_is_literal() {
        let parser = CsvParser::default();
        assert_eq!(
            parser.parse_line(r#"ab"c,d"#).unwrap(),
            vec![r#"ab"c"#, "d"]
        );
    }

    #[test]
    fn test_text_after_closing_quote() {
        let parser = CsvParser::default();
        assert_eq!(parser.parse_line(r#""ab"cd,e"#).unwrap(), vec!["abcd", "e"]);
    }

    #[test]
    fn test_unterminated_quote() {
        let parser = CsvParser::default();
        assert!(matches!(
            parser.parse_line(r#""a,b"#),
            Err(CsvError::UnterminatedQuote { line: 1 })
        ));
    }

    #[test]
    fn test_open_quote_keeps_state() {
        let parser = CsvParser::default();
        let record = pending(parser.tokenize_line(r#"x,"a,b"#, ParseState::Idle));

        assert_eq!(record.fields(), ["x"]);
        assert_eq!(record.field(), "a,b\n");
        assert_eq!(record.lines(), 1);
    }

    #[test]
    fn test_continuation_across_three_lines() {
        let parser = CsvParser::default();
        let first = pending(parser.tokenize_line(r#"1,"first"#, ParseState::Idle));
        let second = pending(parser.tokenize_line("", ParseState::Pending(first)));
        assert_eq!(second.field(), "first\n\n");
        assert_eq!(second.lines(), 2);

        let done = parser.tokenize_line(r#"last",2"#, ParseState::Pending(second));
        assert_eq!(
            done,
            Tokenized::Complete(vec![
                "1".to_string(),
                "first\n\nlast".to_string(),
                "2".to_string()
            ])
        );
    }

    #[test]
    fn test_escaped_quote_on_continuation_line() {
        let parser = CsvParser::default();
        let first = pending(parser.tokenize_line(r#""say"#, ParseState::Idle));
        let done = parser.tokenize_line(r#"""hi""""#, ParseState::Pending(first));
        assert_eq!(done, Tokenized::Complete(vec!["say\n\"hi\"".to_string()]));
    }

    #[test]
    fn test_discarded_record_still_closes_on_quote() {
        let parser = CsvParser::default();
        let record = pending(parser.tokenize_line(r#"a,"long"#, ParseState::Idle)).discard();
        assert!(record.fields().is_empty());
        assert_eq!(record.field(), "");
        assert_eq!(record.lines(), 1);

        let done = parser.tokenize_line(r#"tail",b"#, ParseState::Pending(record));
        assert_eq!(done, Tokenized::Complete(vec!["tail".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_complete_line_is_complete() {
        let parser = CsvParser::default();
        let outcome = parser.tokenize_line("a,b", ParseState::Idle);
        assert!(outcome.is_complete());
    }

    #[test]
    fn test_from_config() {
        let config = ParserConfig::default().with_delimiter('|');
        let parser = CsvParser::from_config(&config);
        assert_eq!(parser.parse_line("a|b").unwrap(), vec!["a", "b"]);
    }
}
