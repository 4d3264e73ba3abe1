//! Error types for TOML parsing and value access.
//!
//! This module provides the positioned [`ParseError`] raised by the parser and
//! the crate-wide [`Error`] returned by value accessors.
//!
//! ## Error Categories
//!
//! - **Parse errors**: grammar violations with a 1-based line and column
//! - **Type mismatches**: a value was read as a kind it does not have
//! - **Lookup errors**: missing keys and out-of-range indices
//!
//! ## Rendering
//!
//! A parse error always renders as `Line {line}, Column {column}: {message}`.
//! The position is the one computed by the parser and is never adjusted here.
//!
//! ## Examples
//!
//! ```rust
//! use tomlet::{parse, ErrorKind};
//!
//! let err = parse("X = ").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::ValueIsMissing);
//! assert_eq!(err.to_string(), "Line 1, Column 5: Value is missing.");
//! ```

use crate::cursor::Position;
use std::fmt;
use thiserror::Error;

/// The category of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A key/value line has no key before `=`.
    KeyIsMissing,
    /// `=` is not followed by a value.
    ValueIsMissing,
    /// A quoted string was opened but never closed.
    StringNotClosed,
    /// A quoted string contains characters its form does not allow.
    InvalidString,
    /// An escape sequence in a basic string is malformed.
    InvalidEscape,
    /// An array element position holds no value.
    ArrayValueIsMissing,
    /// An array was opened but never closed.
    ArrayNotClosed,
    /// An element of a homogeneous array has a different kind than the first.
    ArrayElementTypeMismatch,
    /// An inline table was opened but never closed.
    InlineTableNotClosed,
    /// A key or table is defined more than once.
    DuplicateKey,
    /// A token appears where the grammar forbids it.
    UnexpectedToken,
    /// A character that cannot begin any token.
    InvalidCharacter,
    /// A bare value that is not a valid integer, float, boolean or date-time.
    InvalidValue,
    /// Arrays or inline tables nest deeper than the configured limit.
    NestingTooDeep,
}

impl ErrorKind {
    /// Returns a short, stable name for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::KeyIsMissing => "KeyIsMissing",
            ErrorKind::ValueIsMissing => "ValueIsMissing",
            ErrorKind::StringNotClosed => "StringNotClosed",
            ErrorKind::InvalidString => "InvalidString",
            ErrorKind::InvalidEscape => "InvalidEscape",
            ErrorKind::ArrayValueIsMissing => "ArrayValueIsMissing",
            ErrorKind::ArrayNotClosed => "ArrayNotClosed",
            ErrorKind::ArrayElementTypeMismatch => "ArrayElementTypeMismatch",
            ErrorKind::InlineTableNotClosed => "InlineTableNotClosed",
            ErrorKind::DuplicateKey => "DuplicateKey",
            ErrorKind::UnexpectedToken => "UnexpectedToken",
            ErrorKind::InvalidCharacter => "InvalidCharacter",
            ErrorKind::InvalidValue => "InvalidValue",
            ErrorKind::NestingTooDeep => "NestingTooDeep",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse failure pointing at the token that made the input invalid.
///
/// Lines and columns are 1-based; columns count characters, not bytes.
///
/// # Examples
///
/// ```rust
/// use tomlet::{parse, ErrorKind};
///
/// let err = parse("X = \"Hello").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::StringNotClosed);
/// assert_eq!((err.line(), err.column()), (1, 5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Line {line}, Column {column}: {message}")]
pub struct ParseError {
    kind: ErrorKind,
    message: String,
    line: usize,
    column: usize,
}

impl ParseError {
    /// Creates a parse error at an explicit line and column.
    pub fn new(kind: ErrorKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        ParseError {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    pub(crate) fn at(kind: ErrorKind, message: impl Into<String>, position: Position) -> Self {
        Self::new(kind, message, position.line, position.column)
    }

    pub(crate) fn key_missing(position: Position) -> Self {
        Self::at(ErrorKind::KeyIsMissing, "Key is missing.", position)
    }

    pub(crate) fn value_missing(position: Position) -> Self {
        Self::at(ErrorKind::ValueIsMissing, "Value is missing.", position)
    }

    pub(crate) fn string_not_closed(position: Position) -> Self {
        Self::at(ErrorKind::StringNotClosed, "String not closed.", position)
    }

    pub(crate) fn array_value_missing(position: Position) -> Self {
        Self::at(
            ErrorKind::ArrayValueIsMissing,
            "Array value is missing.",
            position,
        )
    }

    pub(crate) fn array_not_closed(position: Position) -> Self {
        Self::at(ErrorKind::ArrayNotClosed, "Array not closed.", position)
    }

    pub(crate) fn type_mismatch(expected: &str, found: &str, position: Position) -> Self {
        Self::at(
            ErrorKind::ArrayElementTypeMismatch,
            format!(
                "Expected value of type '{}' but value of type '{}' was found.",
                expected, found
            ),
            position,
        )
    }

    /// The error category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message without the position prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based line of the offending token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending token.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Renders the error followed by the offending source line and a caret.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::parse;
    ///
    /// let source = "a = 1\nb = [1, 'x']";
    /// let err = parse(source).unwrap_err();
    /// let rendered = err.render_with_source(source);
    /// assert!(rendered.starts_with("Line 2, Column 9:"));
    /// assert!(rendered.ends_with("        ^"));
    /// ```
    #[must_use]
    pub fn render_with_source(&self, source: &str) -> String {
        let line_text = source_line(source, self.line).unwrap_or("");
        let caret_pad = " ".repeat(self.column.saturating_sub(1));
        format!("{}\n{}\n{}^", self, line_text, caret_pad)
    }
}

/// Returns the text of the 1-based `line`, using the same line breaks as the cursor.
fn source_line(source: &str, line: usize) -> Option<&str> {
    let mut current = 1;
    let mut start = 0;
    let mut chars = source.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        let break_len = match ch {
            '\n' => 1,
            '\r' => match chars.peek() {
                Some((_, '\n')) => {
                    chars.next();
                    2
                }
                Some(_) => 1,
                None => continue,
            },
            _ => continue,
        };
        if current == line {
            return Some(&source[start..offset]);
        }
        current += 1;
        start = offset + break_len;
    }
    if current == line {
        Some(source[start..].trim_end_matches('\r'))
    } else {
        None
    }
}

/// Represents all errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input is not valid TOML.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A value was read as a kind it does not have.
    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// No entry exists for the key.
    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    /// An array index is past the end.
    #[error("Index {index} out of bounds at '{path}' (length {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::Error;
    ///
    /// let err = Error::type_mismatch("server.port", "int", "string");
    /// assert!(err.to_string().contains("expected int"));
    /// ```
    pub fn type_mismatch(path: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the parse error, if this is one.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_shape() {
        let err = ParseError::new(ErrorKind::KeyIsMissing, "Key is missing.", 3, 7);
        assert_eq!(err.to_string(), "Line 3, Column 7: Key is missing.");
    }

    #[test]
    fn test_wrapped_parse_error_is_transparent() {
        let err: Error = ParseError::new(ErrorKind::DuplicateKey, "dup", 1, 2).into();
        assert_eq!(err.to_string(), "Line 1, Column 2: dup");
        assert_eq!(err.as_parse_error().map(ParseError::kind), Some(ErrorKind::DuplicateKey));
    }

    #[test]
    fn test_render_with_source_second_line() {
        let err = ParseError::new(ErrorKind::InvalidValue, "bad", 2, 3);
        let rendered = err.render_with_source("a = 1\nb = x");
        assert_eq!(rendered, "Line 2, Column 3: bad\nb = x\n  ^");
    }

    #[test]
    fn test_render_with_source_past_end() {
        let err = ParseError::new(ErrorKind::ValueIsMissing, "Value is missing.", 4, 1);
        let rendered = err.render_with_source("a = ");
        assert_eq!(rendered, "Line 4, Column 1: Value is missing.\n\n^");
    }
}
