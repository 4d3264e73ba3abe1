//! The tokenizer.
//!
//! [`Tokenizer`] pulls characters from a [`Cursor`] and hands out one
//! [`Token`] per call. Whitespace and comments between tokens are dropped;
//! quoted strings are scanned to their closing delimiter with escapes decoded.
//! Bare runs (keys, numbers, booleans, date-times) are returned as text for the
//! parser to interpret.
//!
//! ```rust
//! use tomlet::lexer::Tokenizer;
//! use tomlet::token::TokenKind;
//!
//! let kinds: Vec<TokenKind> = Tokenizer::new("a = 1 # note")
//!     .map(|t| t.unwrap().kind)
//!     .collect();
//! assert_eq!(kinds, vec![
//!     TokenKind::Bare("a".into()),
//!     TokenKind::Equals,
//!     TokenKind::Bare("1".into()),
//!     TokenKind::Eof,
//! ]);
//! ```

use crate::cursor::{Cursor, Position};
use crate::error::{ErrorKind, ParseError};
use crate::token::{Token, TokenKind};
use crate::value::StringKind;
use crate::Datetime;

type Result<T> = std::result::Result<T, ParseError>;

/// Characters allowed in a bare key.
#[inline]
pub(crate) fn is_bare_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A digit, or a sign followed by a digit. Only such runs keep their dots,
/// so `-a.b` stays a dotted key while `-1.5` stays one number.
pub(crate) fn starts_number(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.starts_with(|c: char| c.is_ascii_digit())
}

/// Control characters TOML forbids inside strings. Newlines are handled separately.
#[inline]
fn is_forbidden_control(c: char) -> bool {
    (c < ' ' && c != '\t' && c != '\n' && c != '\r') || c == '\u{7f}'
}

/// A lazy token stream over one input.
///
/// Once the end of input is reached, [`Tokenizer::next_token`] keeps returning
/// [`TokenKind::Eof`]. The [`Iterator`] implementation yields the `Eof` token
/// (or the first error) once and then stops.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            cursor: Cursor::new(input),
            finished: false,
        }
    }

    /// The position of the next unread character.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Scans the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_trivia();
        let start = self.cursor.position();
        let Some(ch) = self.cursor.peek() else {
            return Ok(Token::new(TokenKind::Eof, start));
        };

        let kind = match ch {
            '\n' | '\r' => {
                if !self.cursor.eat("\r\n") {
                    self.cursor.advance();
                }
                TokenKind::Newline
            }
            '=' => self.punct(TokenKind::Equals),
            ',' => self.punct(TokenKind::Comma),
            '.' => self.punct(TokenKind::Dot),
            '[' => self.punct(TokenKind::LeftBracket),
            ']' => self.punct(TokenKind::RightBracket),
            '{' => self.punct(TokenKind::LeftBrace),
            '}' => self.punct(TokenKind::RightBrace),
            '"' => self.basic_string(start)?,
            '\'' => self.literal_string(start)?,
            c if is_bare_key_char(c) || c == '+' => self.bare(),
            other => {
                return Err(ParseError::at(
                    ErrorKind::InvalidCharacter,
                    format!("Unexpected character '{}'.", other.escape_debug()),
                    start,
                ))
            }
        };
        Ok(Token::new(kind, start))
    }

    /// Skips spaces, tabs, comments, and a `\r` that ends the input.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ' | '\t') => {
                    self.cursor.advance();
                }
                Some('\r') if self.cursor.rest() == "\r" => {
                    self.cursor.advance();
                }
                Some('#') => self.cursor.advance_while(|c| c != '\n' && c != '\r'),
                _ => break,
            }
        }
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.advance();
        kind
    }

    fn bare(&mut self) -> TokenKind {
        let start = self.cursor.offset();
        let signed = matches!(self.cursor.peek(), Some(c) if c.is_ascii_digit() || c == '+' || c == '-');
        let numeric = starts_number(self.cursor.rest());
        while let Some(c) = self.cursor.peek() {
            let take = is_bare_key_char(c)
                || (signed && matches!(c, ':' | '+'))
                || (numeric && c == '.' && self.dot_continues_run())
                || (numeric && c == ' ' && self.at_date_time_separator(start));
            if !take {
                break;
            }
            self.cursor.advance();
        }
        TokenKind::Bare(self.cursor.slice_from(start).to_string())
    }

    /// A dot stays inside a numeric run only when another segment follows,
    /// so `1."a"` still reads as a dotted key.
    fn dot_continues_run(&self) -> bool {
        self.cursor.rest()[1..].starts_with(is_bare_key_char)
    }

    /// A space between a full date and a time, as in `1979-05-27 07:32:00`.
    fn at_date_time_separator(&self, start: usize) -> bool {
        let taken = self.cursor.slice_from(start);
        let after = self.cursor.rest().as_bytes();
        taken.len() == 10
            && Datetime::looks_like(taken)
            && after.len() >= 4
            && after[1].is_ascii_digit()
            && after[2].is_ascii_digit()
            && after[3] == b':'
    }

    fn basic_string(&mut self, start: Position) -> Result<TokenKind> {
        if self.cursor.eat("\"\"\"") {
            return self.multiline_basic_string(start);
        }
        self.cursor.advance();
        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None => return Err(ParseError::string_not_closed(start)),
                Some('"') => {
                    self.cursor.advance();
                    return Ok(TokenKind::String {
                        value,
                        kind: StringKind::Basic,
                    });
                }
                Some('\n' | '\r') => return Err(contains_newlines(start, '"', &value)),
                Some('\\') => self.escape(start, &mut value)?,
                Some(c) if is_forbidden_control(c) => return Err(contains_control(start, c)),
                Some(c) => {
                    self.cursor.advance();
                    value.push(c);
                }
            }
        }
    }

    fn multiline_basic_string(&mut self, start: Position) -> Result<TokenKind> {
        self.trim_leading_newline();
        let mut value = String::new();
        loop {
            if self.close_multiline("\"\"\"", &mut value) {
                return Ok(TokenKind::String {
                    value,
                    kind: StringKind::MultilineBasic,
                });
            }
            match self.cursor.peek() {
                None => return Err(ParseError::string_not_closed(start)),
                Some('\\') => {
                    // A backslash ending a line swallows the break and following indentation.
                    let mark = self.cursor.mark();
                    self.cursor.advance();
                    self.cursor.advance_while(|c| c == ' ' || c == '\t');
                    if matches!(self.cursor.peek(), Some('\n' | '\r')) {
                        self.cursor
                            .advance_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));
                    } else {
                        self.cursor.reset(mark);
                        self.escape(start, &mut value)?;
                    }
                }
                Some(c) if is_forbidden_control(c) => return Err(contains_control(start, c)),
                Some(c) => {
                    self.cursor.advance();
                    value.push(c);
                }
            }
        }
    }

    fn literal_string(&mut self, start: Position) -> Result<TokenKind> {
        if self.cursor.eat("'''") {
            return self.multiline_literal_string(start);
        }
        self.cursor.advance();
        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None => return Err(ParseError::string_not_closed(start)),
                Some('\'') => {
                    self.cursor.advance();
                    return Ok(TokenKind::String {
                        value,
                        kind: StringKind::Literal,
                    });
                }
                Some('\n' | '\r') => return Err(contains_newlines(start, '\'', &value)),
                Some(c) if is_forbidden_control(c) => return Err(contains_control(start, c)),
                Some(c) => {
                    self.cursor.advance();
                    value.push(c);
                }
            }
        }
    }

    fn multiline_literal_string(&mut self, start: Position) -> Result<TokenKind> {
        self.trim_leading_newline();
        let mut value = String::new();
        loop {
            if self.close_multiline("'''", &mut value) {
                return Ok(TokenKind::String {
                    value,
                    kind: StringKind::MultilineLiteral,
                });
            }
            match self.cursor.peek() {
                None => return Err(ParseError::string_not_closed(start)),
                Some(c) if is_forbidden_control(c) => return Err(contains_control(start, c)),
                Some(c) => {
                    self.cursor.advance();
                    value.push(c);
                }
            }
        }
    }

    fn trim_leading_newline(&mut self) {
        if !self.cursor.eat("\r\n") {
            self.cursor.eat("\n");
        }
    }

    /// Consumes a multiline closing delimiter if one is next.
    ///
    /// Up to two quotes directly before the delimiter belong to the content.
    fn close_multiline(&mut self, delimiter: &str, value: &mut String) -> bool {
        if !self.cursor.starts_with(delimiter) {
            return false;
        }
        let quote = &delimiter[..1];
        let mut extra = 0;
        let rest = &self.cursor.rest()[delimiter.len()..];
        while extra < 2 && rest[extra..].starts_with(quote) {
            extra += 1;
        }
        for _ in 0..extra {
            self.cursor.advance();
            value.push_str(quote);
        }
        self.cursor.eat(delimiter)
    }

    /// Decodes one escape sequence starting at the backslash.
    fn escape(&mut self, start: Position, value: &mut String) -> Result<()> {
        let at = self.cursor.position();
        self.cursor.advance();
        let decoded = match self.cursor.advance() {
            Some('b') => '\u{8}',
            Some('t') => '\t',
            Some('n') => '\n',
            Some('f') => '\u{c}',
            Some('r') => '\r',
            Some('"') => '"',
            Some('\\') => '\\',
            Some('u') => self.unicode_escape(4, at)?,
            Some('U') => self.unicode_escape(8, at)?,
            Some(other) => {
                return Err(ParseError::at(
                    ErrorKind::InvalidEscape,
                    format!("Invalid escape sequence '\\{}'.", other.escape_debug()),
                    at,
                ))
            }
            None => return Err(ParseError::string_not_closed(start)),
        };
        value.push(decoded);
        Ok(())
    }

    fn unicode_escape(&mut self, digits: usize, at: Position) -> Result<char> {
        let begin = self.cursor.offset();
        for _ in 0..digits {
            match self.cursor.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.cursor.advance();
                }
                _ => {
                    return Err(ParseError::at(
                        ErrorKind::InvalidEscape,
                        format!("Unicode escape must have {} hex digits.", digits),
                        at,
                    ))
                }
            }
        }
        let hex = self.cursor.slice_from(begin);
        u32::from_str_radix(hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                ParseError::at(
                    ErrorKind::InvalidEscape,
                    format!("Escape '{}' is not a valid unicode scalar value.", hex),
                    at,
                )
            })
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}

fn contains_newlines(start: Position, quote: char, partial: &str) -> ParseError {
    ParseError::at(
        ErrorKind::InvalidString,
        format!(
            "String '{}{}' is invalid because it contains newlines.",
            quote, partial
        ),
        start,
    )
}

fn contains_control(start: Position, c: char) -> ParseError {
    ParseError::at(
        ErrorKind::InvalidString,
        format!(
            "String is invalid because it contains control character U+{:04X}.",
            c as u32
        ),
        start,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Tokenizer::new(input).map(|t| t.unwrap().kind).collect()
    }

    fn bare(s: &str) -> TokenKind {
        TokenKind::Bare(s.to_string())
    }

    fn string(s: &str, kind: StringKind) -> TokenKind {
        TokenKind::String {
            value: s.to_string(),
            kind,
        }
    }

    fn error(input: &str) -> ParseError {
        Tokenizer::new(input)
            .find_map(|t| t.err())
            .expect("expected a tokenizer error")
    }

    #[test]
    fn test_punctuation_and_comments() {
        assert_eq!(
            kinds("[a.b] # header\n{x=1,}"),
            vec![
                TokenKind::LeftBracket,
                bare("a"),
                TokenKind::Dot,
                bare("b"),
                TokenKind::RightBracket,
                TokenKind::Newline,
                TokenKind::LeftBrace,
                bare("x"),
                TokenKind::Equals,
                bare("1"),
                TokenKind::Comma,
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens: Vec<Token> = Tokenizer::new("a = 1\r\n  b = 'x'")
            .map(|t| t.unwrap())
            .collect();
        let positions: Vec<(usize, usize)> = tokens
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 3), (1, 5), (1, 6), (2, 3), (2, 5), (2, 7), (2, 10)]
        );
    }

    #[test]
    fn test_numeric_runs_keep_dots_and_signs() {
        assert_eq!(kinds("1.0"), vec![bare("1.0"), TokenKind::Eof]);
        assert_eq!(kinds("-3.5e+10"), vec![bare("-3.5e+10"), TokenKind::Eof]);
        assert_eq!(
            kinds("1979-05-27T00:32:00.999-07:00"),
            vec![bare("1979-05-27T00:32:00.999-07:00"), TokenKind::Eof]
        );
        assert_eq!(
            kinds("1979-05-27 07:32:00Z"),
            vec![bare("1979-05-27 07:32:00Z"), TokenKind::Eof]
        );
        assert_eq!(
            kinds("a.b"),
            vec![bare("a"), TokenKind::Dot, bare("b"), TokenKind::Eof]
        );
        assert_eq!(
            kinds("-a.b"),
            vec![bare("-a"), TokenKind::Dot, bare("b"), TokenKind::Eof]
        );
        assert_eq!(kinds("-1.5"), vec![bare("-1.5"), TokenKind::Eof]);
        assert_eq!(kinds("+inf"), vec![bare("+inf"), TokenKind::Eof]);
        assert_eq!(
            kinds("1.'a'"),
            vec![
                bare("1"),
                TokenKind::Dot,
                string("a", StringKind::Literal),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(
            kinds(r#""a\tb" 'c\d' """e""" '''f'''"#),
            vec![
                string("a\tb", StringKind::Basic),
                string("c\\d", StringKind::Literal),
                string("e", StringKind::MultilineBasic),
                string("f", StringKind::MultilineLiteral),
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds(r#""""#), vec![string("", StringKind::Basic), TokenKind::Eof]);
    }

    #[test]
    fn test_multiline_trims_first_newline_and_keeps_the_rest() {
        assert_eq!(
            kinds("\"\"\"\nRoses\nViolets\"\"\""),
            vec![string("Roses\nViolets", StringKind::MultilineBasic), TokenKind::Eof]
        );
        assert_eq!(
            kinds("'''\r\nline\r\n'''"),
            vec![string("line\r\n", StringKind::MultilineLiteral), TokenKind::Eof]
        );
    }

    #[test]
    fn test_line_ending_backslash() {
        let tokens: Vec<Token> = Tokenizer::new("\"\"\"The quick \\\n\n    brown\"\"\" x")
            .map(|t| t.unwrap())
            .collect();
        assert_eq!(tokens[0].kind, string("The quick brown", StringKind::MultilineBasic));
        assert_eq!(tokens[1].position, Position { line: 3, column: 14 });
    }

    #[test]
    fn test_extra_quotes_before_multiline_close() {
        assert_eq!(
            kinds(r#""""a"""""  '''b''''"#),
            vec![
                string("a\"\"", StringKind::MultilineBasic),
                string("b'", StringKind::MultilineLiteral),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(
            kinds(r#""é\U0001F600""#),
            vec![string("é😀", StringKind::Basic), TokenKind::Eof]
        );
        let err = error(r#"x "\uD800""#);
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
        assert_eq!((err.line(), err.column()), (1, 4));
    }

    #[test]
    fn test_invalid_escape_points_at_backslash() {
        let err = error(r#""ab\q""#);
        assert_eq!(err.kind(), ErrorKind::InvalidEscape);
        assert_eq!((err.line(), err.column()), (1, 4));
    }

    #[test]
    fn test_unterminated_strings_point_at_opening_quote() {
        for input in ["  \"abc", "  'abc", "  \"\"\"abc\n\n", "  '''abc\r\n", "  \"abc\\"] {
            let err = error(input);
            assert_eq!(err.kind(), ErrorKind::StringNotClosed, "{:?}", input);
            assert_eq!((err.line(), err.column()), (1, 3), "{:?}", input);
        }
    }

    #[test]
    fn test_newline_in_single_line_string() {
        let err = error("x = 'ab\ncd'");
        assert_eq!(err.kind(), ErrorKind::InvalidString);
        assert!(err.message().ends_with("is invalid because it contains newlines."));
        assert_eq!((err.line(), err.column()), (1, 5));
    }

    #[test]
    fn test_control_character_in_string() {
        let err = error("\"a\u{1}\"");
        assert_eq!(err.kind(), ErrorKind::InvalidString);
        assert_eq!((err.line(), err.column()), (1, 1));
    }

    #[test]
    fn test_invalid_character() {
        let err = error("a = @");
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert_eq!((err.line(), err.column()), (1, 5));
    }

    #[test]
    fn test_trailing_carriage_return_is_trivia() {
        let tokens: Vec<Token> = Tokenizer::new("X = \r").map(|t| t.unwrap()).collect();
        let eof = tokens.last().unwrap();
        assert!(eof.is_eof());
        assert_eq!(eof.position, Position { line: 1, column: 6 });
    }

    #[test]
    fn test_eof_repeats() {
        let mut tokenizer = Tokenizer::new("");
        assert!(tokenizer.next_token().unwrap().is_eof());
        assert!(tokenizer.next_token().unwrap().is_eof());
    }
}
