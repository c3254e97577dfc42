//! Physical line sources feeding the reader
//!
//! A source hands out one physical line at a time with its `\n` terminator
//! removed. A `\r` preceding the terminator is left in place; the reader
//! decides whether to strip it.

use std::io::{self, BufRead};

/// Sequential source of physical lines
pub trait LineSource {
    /// Next physical line, or `None` at end of stream
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        (**self).next_line()
    }
}

/// Line source over any buffered reader
///
/// A line that is not valid UTF-8 is consumed and reported as an
/// [`io::ErrorKind::InvalidData`] error; reading can continue with the next line.
///
/// # Examples
///
/// ```
/// use csvstream::source::{LineReader, LineSource};
///
/// let mut lines = LineReader::new("a,b\nc,d\n".as_bytes());
/// assert_eq!(lines.next_line().unwrap(), Some("a,b".to_string()));
/// assert_eq!(lines.next_line().unwrap(), Some("c,d".to_string()));
/// assert_eq!(lines.next_line().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();

        let bytes_read = self.inner.read_line(&mut line)?;
        if bytes_read == 0 {
            return Ok(None); // EOF
        }

        if line.ends_with('\n') {
            line.pop();
        }

        Ok(Some(line))
    }
}

/// Line source over an iterator of already-split lines
#[derive(Debug, Clone)]
pub struct IterLines<I> {
    lines: I,
}

impl<I: Iterator<Item = String>> IterLines<I> {
    /// Wrap a line iterator
    pub fn new<T: IntoIterator<IntoIter = I>>(lines: T) -> Self {
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl<I: Iterator<Item = String>> LineSource for IterLines<I> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<S: LineSource>(mut source: S) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_last_line_without_terminator() {
        assert_eq!(drain(LineReader::new("a\nb".as_bytes())), vec!["a", "b"]);
    }

    #[test]
    fn test_trailing_terminator_adds_no_line() {
        assert_eq!(drain(LineReader::new("a\nb\n".as_bytes())), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(drain(LineReader::new("".as_bytes())).is_empty());
    }

    #[test]
    fn test_blank_lines_preserved() {
        assert_eq!(drain(LineReader::new("\n\nx".as_bytes())), vec!["", "", "x"]);
    }

    #[test]
    fn test_carriage_return_kept() {
        assert_eq!(
            drain(LineReader::new("a\r\nb\r\n".as_bytes())),
            vec!["a\r", "b\r"]
        );
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let mut source = LineReader::new(&[0xff, 0xfe, b'\n'][..]);
        let err = source.next_line().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_continues_after_invalid_utf8() {
        let mut source = LineReader::new(&b"ok\n\xff\nnext"[..]);
        assert_eq!(source.next_line().unwrap(), Some("ok".to_string()));
        assert!(source.next_line().is_err());
        assert_eq!(source.next_line().unwrap(), Some("next".to_string()));
    }

    #[test]
    fn test_iter_lines() {
        let source = IterLines::new(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(drain(source), vec!["x", "y"]);
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn LineSource> = Box::new(LineReader::new("1\n2".as_bytes()));
        assert_eq!(drain(source), vec!["1", "2"]);
    }
}
