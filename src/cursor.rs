//! Character cursor over the source text with line/column tracking.
//!
//! [`Cursor`] hands out one `char` at a time and keeps a 1-based line and
//! column (counted in characters). `\n`, `\r\n`, and a lone `\r` each count as
//! a single line break. A lone `\r` that ends the input only advances the
//! column, because no line follows it.

use std::fmt;

/// A 1-based line/column location in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The first character of the input.
    pub const START: Position = Position { line: 1, column: 1 };

    /// Returns the position `n` characters further along the same line.
    #[must_use]
    pub const fn shifted(self, n: usize) -> Position {
        Position {
            line: self.line,
            column: self.column + n,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A saved cursor state. Restoring it restores offset, line and column together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    offset: usize,
    position: Position,
}

/// Walks `input` character by character.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            offset: 0,
            position: Position::START,
        }
    }

    /// The next character, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes one character and updates the position.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        match ch {
            '\n' => self.new_line(),
            // `\r\n` breaks at the `\n`; a final `\r` has no line after it.
            '\r' if self.rest().is_empty() || self.rest().starts_with('\n') => {
                self.position.column += 1;
            }
            '\r' => self.new_line(),
            _ => self.position.column += 1,
        }
        Some(ch)
    }

    /// Consumes characters while `pred` holds.
    pub fn advance_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Consumes `pat` if the remaining input starts with it.
    pub fn eat(&mut self, pat: &str) -> bool {
        if !self.starts_with(pat) {
            return false;
        }
        for _ in pat.chars() {
            self.advance();
        }
        true
    }

    #[inline]
    pub fn starts_with(&self, pat: &str) -> bool {
        self.rest().starts_with(pat)
    }

    /// The unconsumed input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The input between a byte offset and the current offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        Mark {
            offset: self.offset,
            position: self.position,
        }
    }

    #[inline]
    pub fn reset(&mut self, mark: Mark) {
        self.offset = mark.offset;
        self.position = mark.position;
    }

    fn new_line(&mut self) {
        self.position.line += 1;
        self.position.column = 1;
    }
}
