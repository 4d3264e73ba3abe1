//! Tokens produced by the [`Tokenizer`](crate::lexer::Tokenizer).

use crate::cursor::Position;
use crate::value::StringKind;
use std::fmt;

/// The type of a [`Token`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `=`
    Equals,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// A line break (`\n`, `\r\n`, or `\r`).
    Newline,
    /// A quoted string with escapes already decoded.
    String { value: String, kind: StringKind },
    /// An unquoted run: a bare key, number, boolean or date-time.
    Bare(String),
    /// End of input. Returned again on every later pull.
    Eof,
}

impl TokenKind {
    /// Returns `true` if a value can start with this token.
    #[must_use]
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            TokenKind::String { .. }
                | TokenKind::Bare(_)
                | TokenKind::LeftBracket
                | TokenKind::LeftBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Equals => f.write_str("="),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Dot => f.write_str("."),
            TokenKind::LeftBracket => f.write_str("["),
            TokenKind::RightBracket => f.write_str("]"),
            TokenKind::LeftBrace => f.write_str("{"),
            TokenKind::RightBrace => f.write_str("}"),
            TokenKind::Newline => f.write_str("end of line"),
            TokenKind::String { value, kind } => {
                write!(f, "{}{}{}", kind.delimiter(), value, kind.delimiter())
            }
            TokenKind::Bare(text) => f.write_str(text),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and the position of its first character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Token { kind, position }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
