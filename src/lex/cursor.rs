use std::ops::Range;

use super::{LexError, LexErrorWithRange};
use crate::command::mixin::SourceRangeMixinExt;

/// Walks the source line by line. Every line of SUS is classified independently.
pub struct Cursor<'a> {
    /// The line position, starts with 1.
    line: usize,
    /// The index position.
    index: usize,
    /// The source str.
    source: &'a str,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the beginning of `source`.
    pub const fn new(source: &'a str) -> Self {
        Self {
            line: 1,
            index: 0,
            source,
        }
    }

    /// Whether the whole source is consumed.
    pub const fn is_end(&self) -> bool {
        self.index >= self.source.len()
    }

    /// The line number of the line to be returned next, starts with 1.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the current byte index in the source string.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Determine the end of the current line and handle CRLF (\r\n) correctly.
    ///
    /// Returns a tuple `(consumed_end, line_end_index)` where:
    /// - `consumed_end` is the absolute byte index after the line feed, or the source length.
    /// - `line_end_index` is the absolute byte index where the line content ends (exclusive),
    ///   excluding a trailing carriage return.
    fn current_line_bounds(&self) -> (usize, usize) {
        let rest = &self.source[self.index..];
        let Some(lf) = rest.find('\n') else {
            return (self.source.len(), self.source.len());
        };
        let line_end_index = if rest[..lf].ends_with('\r') {
            self.index + lf - 1
        } else {
            self.index + lf
        };
        (self.index + lf + 1, line_end_index)
    }

    /// Move cursor through the current line, and return it trimmed with its range.
    pub fn next_line_with_range(&mut self) -> Option<(Range<usize>, &'a str)> {
        if self.is_end() {
            return None;
        }
        let (consumed_end, line_end_index) = self.current_line_bounds();
        let raw = &self.source[self.index..line_end_index];
        let leading = raw.len() - raw.trim_start().len();
        let trimmed = raw.trim();
        let start = self.index + leading;
        self.index = consumed_end;
        self.line += 1;
        Some((start..start + trimmed.len(), trimmed))
    }

    /// Move cursor through the current line, and return it trimmed.
    pub fn next_line(&mut self) -> Option<&'a str> {
        self.next_line_with_range().map(|(_, line)| line)
    }

    /// Makes an error on the line just returned.
    pub fn make_err_expected_token(
        &self,
        range: Range<usize>,
        message: impl Into<String>,
    ) -> LexErrorWithRange {
        LexError::ExpectedToken {
            line: self.line - 1,
            message: message.into(),
        }
        .into_wrapper_range(range)
    }
}

#[test]
fn test_lines() {
    let mut cursor = Cursor::new(
        r"
            #TITLE hoge
            #00010:10

        ",
    );

    assert_eq!(cursor.index(), 0);
    assert_eq!(cursor.next_line(), Some(""));
    assert_eq!(cursor.next_line(), Some("#TITLE hoge"));
    assert_eq!(cursor.line(), 3);
    assert_eq!(cursor.next_line(), Some("#00010:10"));
    assert_eq!(cursor.next_line(), Some(""));
    assert_eq!(cursor.next_line(), Some(""));
    assert_eq!(cursor.next_line(), None);
    assert!(cursor.is_end());
}

#[test]
fn test_next_line_crlf() {
    const SOURCE: &str = "#TITLE Hello\r\n#ARTIST Foo\r\nLAST\r\n";

    let mut cursor = Cursor::new(SOURCE);

    assert_eq!(cursor.next_line_with_range(), Some((0..12, "#TITLE Hello")));
    assert_eq!(cursor.next_line_with_range(), Some((14..25, "#ARTIST Foo")));
    assert_eq!(cursor.next_line(), Some("LAST"));
    assert_eq!(cursor.next_line(), None);
}

#[test]
fn test_next_line_no_trailing_newline() {
    const SOURCE: &str = "#A Alpha\n  #B Beta\nEND";

    let mut cursor = Cursor::new(SOURCE);

    assert_eq!(cursor.next_line(), Some("#A Alpha"));
    assert_eq!(cursor.next_line_with_range(), Some((11..18, "#B Beta")));
    assert_eq!(cursor.next_line(), Some("END"));
    assert_eq!(cursor.next_line(), None);
}
