//! Streaming CSV record reader
//!
//! Pulls physical lines from a [`LineSource`], feeds them through the
//! tokenizer and hands back one logical record per call. Memory usage is
//! bounded by the largest single record.

use crate::csv::{CsvParser, ParseState, Tokenized};
use crate::error::{CsvError, Result};
use crate::source::{LineReader, LineSource};
use crate::types::{ParserConfig, Record};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, trace};

/// Reader over a CSV file on disk
pub type FileCsvReader = CsvReader<LineReader<BufReader<File>>>;

/// CSV reader with streaming, pull-based record access
///
/// Records are read one at a time. A quoted field that contains line breaks
/// makes a record span several physical lines; the reader keeps pulling lines
/// until the quote closes.
///
/// A reader is not meant to be shared between threads without external
/// locking; each instance keeps its own counters.
///
/// # Examples
///
/// ```
/// use csvstream::CsvReader;
///
/// let mut reader = CsvReader::from_reader("name,note\nAda,\"line one\nline two\"\n".as_bytes());
///
/// assert_eq!(reader.read_next().unwrap(), Some(vec!["name".to_string(), "note".to_string()]));
/// assert_eq!(
///     reader.read_next().unwrap(),
///     Some(vec!["Ada".to_string(), "line one\nline two".to_string()])
/// );
/// assert_eq!(reader.read_next().unwrap(), None);
///
/// assert_eq!(reader.records_read(), 2);
/// assert_eq!(reader.lines_read(), 3);
/// ```
///
/// # Skipping a header line
///
/// ```
/// use csvstream::CsvReader;
///
/// let source = csvstream::source::LineReader::new("id;name\n1;Ada".as_bytes());
/// let mut reader = CsvReader::with_options(source, ';', '"', 1).unwrap();
///
/// assert_eq!(reader.read_all().unwrap(), vec![vec!["1", "Ada"]]);
/// ```
#[derive(Debug)]
pub struct CsvReader<S> {
    // Input source, `None` once closed
    source: Option<S>,

    // Parser state
    parser: CsvParser,
    state: ParseState,
    record_start_line: u64,
    peeked: Option<Record>,
    skip_remaining: usize,
    // Set while the rest of a record over the multi-line limit is being dropped
    discarding: bool,

    // Counters
    lines_read: u64,
    records_read: u64,

    // Configuration
    config: ParserConfig,
}

impl<S: LineSource> CsvReader<S> {
    /// Create a reader with the default configuration
    pub fn new(source: S) -> Self {
        let config = ParserConfig::default();
        Self::build(source, config)
    }

    /// Create a reader with a custom configuration
    ///
    /// Fails with [`CsvError::InvalidConfig`] when the configuration is unusable.
    pub fn with_config(source: S, config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(source, config))
    }

    /// Create a reader with a custom delimiter, quote character and leading-line skip count
    pub fn with_options(
        source: S,
        delimiter: char,
        quote_char: char,
        skip_lines: usize,
    ) -> Result<Self> {
        let config = ParserConfig::default()
            .with_delimiter(delimiter)
            .with_quote_char(quote_char)
            .with_skip_lines(skip_lines);
        Self::with_config(source, config)
    }

    fn build(source: S, config: ParserConfig) -> Self {
        CsvReader {
            source: Some(source),
            parser: CsvParser::from_config(&config),
            state: ParseState::Idle,
            record_start_line: 0,
            peeked: None,
            skip_remaining: config.skip_lines,
            discarding: false,
            lines_read: 0,
            records_read: 0,
            config,
        }
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` at end of stream. Fails with
    /// [`CsvError::UnterminatedQuote`] if the stream ends inside a quoted field,
    /// and with [`CsvError::ReaderClosed`] after [`close`](Self::close).
    ///
    /// Source failures come back as [`CsvError::Io`] and leave the reader as it
    /// was before the failed line; a record in progress stays in progress. The
    /// failed line is not counted in [`lines_read`](Self::lines_read). Callers
    /// that need exact line accounting should stop reading after an I/O error.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_reader("a,b\nc,d".as_bytes());
    ///
    /// while let Some(record) = reader.read_next().unwrap() {
    ///     println!("{:?}", record);
    /// }
    /// ```
    pub fn read_next(&mut self) -> Result<Option<Record>> {
        if self.source.is_none() {
            return Err(CsvError::ReaderClosed);
        }

        let record = match self.peeked.take() {
            Some(record) => Some(record),
            None => self.read_record()?,
        };

        if record.is_some() {
            self.records_read += 1;
        }
        Ok(record)
    }

    /// Read every remaining record
    ///
    /// Stops at the first error; records read before it are dropped. Use
    /// [`read_all_partial`](Self::read_all_partial) to keep them.
    pub fn read_all(&mut self) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }

    /// Read every remaining record, returning the parsed prefix alongside the first error
    pub fn read_all_partial(&mut self) -> (Vec<Record>, Option<CsvError>) {
        let mut records = Vec::new();
        loop {
            match self.read_next() {
                Ok(Some(record)) => records.push(record),
                Ok(None) => return (records, None),
                Err(e) => return (records, Some(e)),
            }
        }
    }

    /// Look at the next record without consuming it
    ///
    /// Physical lines are consumed (and counted) now; the record counts toward
    /// [`records_read`](Self::records_read) once [`read_next`](Self::read_next)
    /// returns it.
    pub fn peek(&mut self) -> Result<Option<&Record>> {
        if self.source.is_none() {
            return Err(CsvError::ReaderClosed);
        }

        if self.peeked.is_none() {
            self.peeked = self.read_record()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Discard up to `count` records, returning how many were skipped
    pub fn skip(&mut self, count: usize) -> Result<usize> {
        for skipped in 0..count {
            if self.read_next()?.is_none() {
                return Ok(skipped);
            }
        }
        Ok(count)
    }

    /// Get iterator over records
    ///
    /// The iterator ends after end of stream or after yielding the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_reader("x\ny\nz".as_bytes());
    /// let count = reader.records().filter_map(|r| r.ok()).count();
    /// assert_eq!(count, 3);
    /// ```
    pub fn records(&mut self) -> CsvRecordIterator<'_, S> {
        CsvRecordIterator {
            reader: self,
            done: false,
        }
    }

    /// Release the source
    ///
    /// Closing in the middle of a multi-line record is not an error. Any later
    /// read fails with [`CsvError::ReaderClosed`]. Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(source) = self.source.take() {
            debug!(
                lines_read = self.lines_read,
                records_read = self.records_read,
                open_record = self.state.is_pending(),
                "closing CSV reader"
            );
            drop(source);
        }
        self.peeked = None;
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Physical lines consumed from the source, skipped lines included
    ///
    /// Only lines the source delivered are counted. A line whose read failed
    /// with [`CsvError::Io`] (for example invalid UTF-8 from a [`LineReader`])
    /// is not counted, even if the source consumed its bytes.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Records returned so far
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Configuration this reader was built with
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Pull physical lines until one logical record is complete
    fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            let source = self.source.as_mut().ok_or(CsvError::ReaderClosed)?;

            let Some(mut line) = source.next_line()? else {
                if std::mem::take(&mut self.discarding) {
                    // Already reported as MultilineLimitExceeded
                    self.state = ParseState::Idle;
                    return Ok(None);
                }
                return match std::mem::take(&mut self.state) {
                    ParseState::Idle => Ok(None),
                    ParseState::Pending(_) => {
                        debug!(
                            line = self.record_start_line,
                            "input ended inside a quoted field"
                        );
                        Err(CsvError::UnterminatedQuote {
                            line: self.record_start_line,
                        })
                    }
                };
            };
            self.lines_read += 1;

            if self.skip_remaining > 0 {
                self.skip_remaining -= 1;
                debug!(
                    line = self.lines_read,
                    remaining = self.skip_remaining,
                    "skipped leading line"
                );
                continue;
            }

            if !self.config.keep_carriage_return && line.ends_with('\r') {
                line.pop();
            }

            let state = std::mem::take(&mut self.state);
            if !state.is_pending() {
                self.record_start_line = self.lines_read;
            }

            match self.parser.tokenize_line(&line, state) {
                Tokenized::Complete(_) if self.discarding => {
                    self.discarding = false;
                    debug!(
                        start_line = self.record_start_line,
                        end_line = self.lines_read,
                        "dropped record over the multi-line limit"
                    );
                }
                Tokenized::Complete(record) => return Ok(Some(record)),
                Tokenized::Pending(pending) if self.discarding => {
                    self.state = ParseState::Pending(pending.discard());
                }
                Tokenized::Pending(pending) => {
                    if let Some(limit) = self.config.multiline_limit {
                        if pending.lines() >= limit {
                            self.discarding = true;
                            self.state = ParseState::Pending(pending.discard());
                            return Err(CsvError::MultilineLimitExceeded {
                                limit,
                                line: self.record_start_line,
                            });
                        }
                    }

                    trace!(
                        start_line = self.record_start_line,
                        lines = pending.lines(),
                        "quoted field continues on next line"
                    );
                    self.state = ParseState::Pending(pending);
                }
            }
        }
    }
}

impl<R: Read> CsvReader<LineReader<BufReader<R>>> {
    /// Create a reader over any byte stream with the default configuration
    pub fn from_reader(reader: R) -> Self {
        Self::new(LineReader::new(BufReader::new(reader)))
    }
}

impl CsvReader<LineReader<BufReader<File>>> {
    /// Open a CSV file with the default configuration
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::open("data.csv").unwrap();
    ///
    /// for record in reader.records() {
    ///     println!("{:?}", record.unwrap());
    /// }
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, ParserConfig::default())
    }

    /// Open a CSV file with a custom configuration
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: ParserConfig) -> Result<Self> {
        config.validate()?;
        let file = File::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "opened CSV file");
        Ok(Self::build(LineReader::new(BufReader::new(file)), config))
    }
}

/// Iterator over CSV records
pub struct CsvRecordIterator<'a, S> {
    reader: &'a mut CsvReader<S>,
    done: bool,
}

impl<'a, S: LineSource> Iterator for CsvRecordIterator<'a, S> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.reader.read_next() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
