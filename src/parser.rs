//! Recursive-descent TOML parser.
//!
//! The [`Parser`] pulls tokens from a [`Tokenizer`] with one token of
//! lookahead and builds the root [`Table`] in a single pass. The first grammar
//! violation stops the parse; no partial tree is returned.
//!
//! ## Table rules
//!
//! - a `[header]` may define a table once; implicit super-tables may be
//!   defined later, once
//! - tables created by dotted keys or inline tables cannot be reopened by a
//!   header
//! - `[[header]]` appends to an array of tables, never to a static array
//!
//! Every violation is reported as [`ErrorKind::DuplicateKey`].
//!
//! ## Usage
//!
//! Most users should call [`parse`](crate::parse). The parser itself returns
//! the bare root table:
//!
//! ```rust
//! use tomlet::parser::Parser;
//!
//! let root = Parser::new("[owner]\nname = 'Tom'").parse().unwrap();
//! let owner = root.get("owner").unwrap();
//! assert_eq!(owner.get("name").and_then(|v| v.as_str()), Some("Tom"));
//! ```

use crate::cursor::Position;
use crate::error::{ErrorKind, ParseError};
use crate::lexer::{is_bare_key_char, Tokenizer};
use crate::options::ParseOptions;
use crate::ser::format_key_path;
use crate::table::{Table, TableStyle};
use crate::token::{Token, TokenKind};
use crate::{Datetime, Value};
use std::collections::HashSet;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, ParseError>;

/// One key segment and where it was written.
#[derive(Clone, Debug)]
struct Key {
    name: String,
    position: Position,
}

fn names(keys: &[Key]) -> Vec<String> {
    keys.iter().map(|k| k.name.clone()).collect()
}

/// The TOML parser.
///
/// Created via [`Parser::new`] or [`Parser::with_options`] and consumed by
/// [`Parser::parse`].
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    peeked: Option<Token>,
    options: ParseOptions,
    root: Table,
    /// Path of the table that key/value lines currently go into.
    current: Vec<String>,
    /// Tables opened by a `[header]`.
    defined: HashSet<Vec<String>>,
    /// Arrays created by `[[header]]`.
    table_arrays: HashSet<Vec<String>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Parser {
            tokens: Tokenizer::new(input),
            peeked: None,
            options,
            root: Table::new(),
            current: Vec::new(),
            defined: HashSet::new(),
            table_arrays: HashSet::new(),
            depth: 0,
        }
    }

    /// Parses the whole input into the root table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] found. Its position points at the
    /// offending token.
    pub fn parse(mut self) -> Result<Table> {
        match self.document() {
            Ok(()) => {
                debug!(keys = self.root.len(), "parsed document");
                Ok(self.root)
            }
            Err(err) => {
                debug!(
                    kind = %err.kind(),
                    line = err.line(),
                    column = err.column(),
                    "parse failed"
                );
                Err(err)
            }
        }
    }

    fn document(&mut self) -> Result<()> {
        loop {
            let token = self.next()?;
            match token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Newline => continue,
                TokenKind::LeftBracket => self.header(token.position)?,
                _ => self.key_value(token)?,
            }
            self.line_end()?;
        }
    }

    fn peek(&mut self) -> Result<&Token> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.tokens.next_token()?,
        };
        Ok(self.peeked.insert(token))
    }

    fn next(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.tokens.next_token(),
        }
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.peek()?.kind == TokenKind::Newline {
            self.next()?;
        }
        Ok(())
    }

    fn line_end(&mut self) -> Result<()> {
        let token = self.next()?;
        match token.kind {
            TokenKind::Newline | TokenKind::Eof => Ok(()),
            other => Err(ParseError::at(
                ErrorKind::UnexpectedToken,
                format!("Expected end of line but found '{}'.", other),
                token.position,
            )),
        }
    }

    /// Opens an array or inline table, enforcing the depth limit.
    fn enter(&mut self, open: Position) -> Result<()> {
        self.depth += 1;
        trace!(depth = self.depth, "nesting");
        if self.depth > self.options.max_depth {
            return Err(ParseError::at(
                ErrorKind::NestingTooDeep,
                format!(
                    "Nesting exceeds the maximum depth of {}.",
                    self.options.max_depth
                ),
                open,
            ));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // ---- keys ----

    /// Parses a possibly dotted key starting at `first`.
    ///
    /// In headers every bare run is split at `.`; in key/value lines only the
    /// segments after an explicit dot are, so `1.0 = x` is rejected.
    fn key_path(&mut self, first: Token, in_header: bool) -> Result<Vec<Key>> {
        let mut keys = Vec::new();
        key_segments(first, in_header, &mut keys)?;
        while self.peek()?.kind == TokenKind::Dot {
            self.next()?;
            let token = self.next()?;
            key_segments(token, true, &mut keys)?;
        }
        Ok(keys)
    }

    fn expect_equals(&mut self) -> Result<()> {
        let token = self.next()?;
        if token.kind == TokenKind::Equals {
            return Ok(());
        }
        Err(ParseError::at(
            ErrorKind::UnexpectedToken,
            format!("Expected '=' after key but found '{}'.", token.kind),
            token.position,
        ))
    }

    // ---- tables ----

    fn header(&mut self, open: Position) -> Result<()> {
        let is_array = {
            let next = self.peek()?;
            next.kind == TokenKind::LeftBracket && next.position == open.shifted(1)
        };
        if is_array {
            self.next()?;
        }

        let first = self.next()?;
        let keys = self.key_path(first, true)?;

        let close = self.next()?;
        let closed = close.kind == TokenKind::RightBracket
            && (!is_array || {
                let second = self.next()?;
                second.kind == TokenKind::RightBracket && second.position == close.position.shifted(1)
            });
        if !closed {
            let expected = if is_array { "]]" } else { "]" };
            return Err(ParseError::at(
                ErrorKind::UnexpectedToken,
                format!(
                    "Expected '{}' to close the table header but found '{}'.",
                    expected, close.kind
                ),
                close.position,
            ));
        }

        trace!(path = %format_key_path(&names(&keys)), array = is_array, "table header");
        if is_array {
            self.open_table_array(&keys)
        } else {
            self.open_table(&keys)
        }
    }

    fn open_table(&mut self, keys: &[Key]) -> Result<()> {
        let path = names(keys);
        let Some((last, parents)) = keys.split_last() else {
            return Ok(());
        };
        let parent = descend(&mut self.root, parents, &self.table_arrays)?;
        match parent.get_mut(&last.name) {
            None => {
                parent.insert(last.name.clone(), Value::Table(Table::new()));
            }
            Some(Value::Table(table))
                if table.style() == TableStyle::Standard && !self.defined.contains(&path) => {}
            Some(_) => {
                return Err(ParseError::at(
                    ErrorKind::DuplicateKey,
                    format!("Table '{}' is defined more than once.", format_key_path(&path)),
                    last.position,
                ))
            }
        }
        self.defined.insert(path.clone());
        self.current = path;
        Ok(())
    }

    fn open_table_array(&mut self, keys: &[Key]) -> Result<()> {
        let path = names(keys);
        let Some((last, parents)) = keys.split_last() else {
            return Ok(());
        };
        let parent = descend(&mut self.root, parents, &self.table_arrays)?;
        match parent.get_mut(&last.name) {
            None => {
                parent.insert(last.name.clone(), Value::Array(vec![Value::Table(Table::new())]));
                self.table_arrays.insert(path.clone());
            }
            Some(Value::Array(items)) if self.table_arrays.contains(&path) => {
                items.push(Value::Table(Table::new()));
            }
            Some(_) => {
                return Err(ParseError::at(
                    ErrorKind::DuplicateKey,
                    format!(
                        "Key '{}' is defined more than once and is not an array of tables.",
                        format_key_path(&path)
                    ),
                    last.position,
                ))
            }
        }

        // A new element starts empty, so its sub-tables may be defined again.
        let nested = |p: &Vec<String>| p.len() > path.len() && p.starts_with(&path);
        self.defined.retain(|p| !nested(p));
        self.table_arrays.retain(|p| !nested(p));
        self.current = path;
        Ok(())
    }

    // ---- key/value ----

    fn key_value(&mut self, first: Token) -> Result<()> {
        let keys = self.key_path(first, false)?;
        self.expect_equals()?;
        let value = self.value()?;
        let section = walk_mut(&mut self.root, &self.current).ok_or_else(|| {
            ParseError::at(
                ErrorKind::DuplicateKey,
                format!(
                    "Table '{}' is no longer a table.",
                    format_key_path(&self.current)
                ),
                keys[0].position,
            )
        })?;
        insert_dotted(section, &keys, value)
    }

    fn value(&mut self) -> Result<Value> {
        let token = self.next()?;
        match token.kind {
            TokenKind::String { value, kind } => Ok(Value::string_with_kind(value, kind)),
            TokenKind::Bare(text) => scalar(&text).ok_or_else(|| {
                ParseError::at(
                    ErrorKind::InvalidValue,
                    format!("Value '{}' is not a valid TOML value.", text),
                    token.position,
                )
            }),
            TokenKind::LeftBracket => self.array(token.position),
            TokenKind::LeftBrace => self.inline_table(token.position),
            _ => Err(ParseError::value_missing(token.position)),
        }
    }

    fn array(&mut self, open: Position) -> Result<Value> {
        self.enter(open)?;
        let mut items: Vec<Value> = Vec::new();
        loop {
            self.skip_newlines()?;
            let token = self.peek()?;
            if token.kind == TokenKind::RightBracket {
                self.next()?;
                break;
            }
            if !token.kind.starts_value() {
                return Err(ParseError::array_value_missing(token.position));
            }

            let start = token.position;
            let value = self.value()?;
            if self.options.homogeneous_arrays {
                if let Some(first) = items.first() {
                    if first.kind() != value.kind() {
                        return Err(ParseError::type_mismatch(
                            first.type_name(),
                            value.type_name(),
                            start,
                        ));
                    }
                }
            }
            items.push(value);

            self.skip_newlines()?;
            let token = self.next()?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RightBracket => break,
                _ => return Err(ParseError::array_not_closed(token.position)),
            }
        }
        self.leave();
        Ok(Value::Array(items))
    }

    fn inline_table(&mut self, open: Position) -> Result<Value> {
        self.enter(open)?;
        let mut table = Table::inline();
        if self.peek()?.kind == TokenKind::RightBrace {
            self.next()?;
            self.leave();
            return Ok(Value::Table(table));
        }
        loop {
            let token = self.next()?;
            if matches!(token.kind, TokenKind::Newline | TokenKind::Eof) {
                return Err(inline_table_not_closed(token.position));
            }
            let keys = self.key_path(token, false)?;
            self.expect_equals()?;
            let value = self.value()?;
            insert_dotted(&mut table, &keys, value)?;

            let token = self.next()?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RightBrace => break,
                _ => return Err(inline_table_not_closed(token.position)),
            }
        }
        self.leave();
        Ok(Value::Table(table))
    }
}

fn inline_table_not_closed(position: Position) -> ParseError {
    ParseError::at(
        ErrorKind::InlineTableNotClosed,
        "Inline table not closed.",
        position,
    )
}

fn invalid_key(text: &str, position: Position) -> ParseError {
    ParseError::at(
        ErrorKind::UnexpectedToken,
        format!(
            "Failed to parse key because unexpected token '{}' was found.",
            text
        ),
        position,
    )
}

/// Appends the segments carried by one key token.
fn key_segments(token: Token, split_dots: bool, keys: &mut Vec<Key>) -> Result<()> {
    match token.kind {
        TokenKind::String { value, kind } if !kind.is_multiline() => {
            keys.push(Key {
                name: value,
                position: token.position,
            });
            Ok(())
        }
        TokenKind::Bare(text) => {
            let valid = |segment: &str| !segment.is_empty() && segment.chars().all(is_bare_key_char);
            if !split_dots {
                if !valid(&text) {
                    return Err(invalid_key(&text, token.position));
                }
                keys.push(Key {
                    name: text,
                    position: token.position,
                });
                return Ok(());
            }
            // Bare runs are ASCII, so byte offsets are column offsets.
            let mut offset = 0;
            for segment in text.split('.') {
                let position = token.position.shifted(offset);
                if !valid(segment) {
                    return Err(invalid_key(&text, position));
                }
                keys.push(Key {
                    name: segment.to_string(),
                    position,
                });
                offset += segment.len() + 1;
            }
            Ok(())
        }
        TokenKind::Equals | TokenKind::Newline | TokenKind::Eof => {
            Err(ParseError::key_missing(token.position))
        }
        other => Err(invalid_key(&other.to_string(), token.position)),
    }
}

fn duplicate_key(keys: &[Key]) -> ParseError {
    let position = keys.last().map_or(Position::START, |k| k.position);
    ParseError::at(
        ErrorKind::DuplicateKey,
        format!("Key '{}' is defined more than once.", format_key_path(&names(keys))),
        position,
    )
}

/// Walks header `keys` from `root`, creating implicit tables on the way.
///
/// Arrays of tables are entered through their last element.
fn descend<'t>(
    root: &'t mut Table,
    keys: &[Key],
    table_arrays: &HashSet<Vec<String>>,
) -> Result<&'t mut Table> {
    let mut table = root;
    let mut path = Vec::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        path.push(key.name.clone());
        let entry = table.get_or_insert_with(&key.name, || Value::Table(Table::new()));
        table = match entry {
            Value::Table(inner) if inner.style() != TableStyle::Inline => inner,
            Value::Array(items) if table_arrays.contains(&path) => match items.last_mut() {
                Some(Value::Table(inner)) => inner,
                _ => return Err(duplicate_key(&keys[..=i])),
            },
            _ => return Err(duplicate_key(&keys[..=i])),
        };
    }
    Ok(table)
}

/// Finds the table at `path`, entering arrays of tables through their last element.
fn walk_mut<'t>(root: &'t mut Table, path: &[String]) -> Option<&'t mut Table> {
    let mut table = root;
    for name in path {
        table = match table.get_mut(name)? {
            Value::Table(inner) => inner,
            Value::Array(items) => items.last_mut()?.as_table_mut()?,
            _ => return None,
        };
    }
    Some(table)
}

/// Inserts `value` under a possibly dotted key, creating dotted tables as needed.
fn insert_dotted(table: &mut Table, keys: &[Key], value: Value) -> Result<()> {
    let Some((last, parents)) = keys.split_last() else {
        return Ok(());
    };
    let mut target = table;
    for (i, key) in parents.iter().enumerate() {
        let entry = target.get_or_insert_with(&key.name, || {
            Value::Table(Table::with_style(TableStyle::Dotted))
        });
        target = match entry {
            Value::Table(inner) if inner.style() == TableStyle::Dotted => inner,
            _ => return Err(duplicate_key(&keys[..=i])),
        };
    }
    target
        .try_insert(last.name.clone(), value)
        .map(|_| ())
        .map_err(|_| duplicate_key(keys))
}

// ---- scalars ----

/// Interprets a bare run as a boolean, number or date-time.
fn scalar(text: &str) -> Option<Value> {
    match text {
        "true" => return Some(Value::Boolean(true)),
        "false" => return Some(Value::Boolean(false)),
        "inf" | "+inf" => return Some(Value::Float(f64::INFINITY)),
        "-inf" => return Some(Value::Float(f64::NEG_INFINITY)),
        "nan" | "+nan" => return Some(Value::Float(f64::NAN)),
        "-nan" => return Some(Value::Float(-f64::NAN)),
        _ => {}
    }
    if Datetime::looks_like(text) {
        return text.parse().ok().map(Value::Datetime);
    }
    parse_integer(text)
        .map(Value::Integer)
        .or_else(|| parse_float(text).map(Value::Float))
}

fn split_sign(text: &str) -> (&str, &str) {
    match text.as_bytes().first() {
        Some(b'+' | b'-') => text.split_at(1),
        _ => ("", text),
    }
}

/// Removes `_` separators, which are only allowed between two digits of
/// the given radix.
fn strip_underscores(text: &str, radix: u32) -> Option<String> {
    let bytes = text.as_bytes();
    let is_digit = |b: &u8| char::from(*b).is_digit(radix);
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'_' {
            continue;
        }
        let before = i > 0 && is_digit(&bytes[i - 1]);
        let after = bytes.get(i + 1).map_or(false, is_digit);
        if !before || !after {
            return None;
        }
    }
    Some(text.replace('_', ""))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_integer(text: &str) -> Option<i64> {
    let radix = match text.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = strip_underscores(&text[2..], radix)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return i64::from_str_radix(&digits, radix).ok();
    }

    let (sign, unsigned) = split_sign(text);
    let digits = strip_underscores(unsigned, 10)?;
    if !is_digits(&digits) || (digits.len() > 1 && digits.starts_with('0')) {
        return None;
    }
    format!("{}{}", sign, digits).parse().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    let (sign, unsigned) = split_sign(text);
    let cleaned = strip_underscores(unsigned, 10)?;

    let (mantissa, exponent) = match cleaned.find(['e', 'E']) {
        Some(i) => (&cleaned[..i], Some(&cleaned[i + 1..])),
        None => (cleaned.as_str(), None),
    };
    let (integral, fraction) = match mantissa.split_once('.') {
        Some((integral, fraction)) => (integral, Some(fraction)),
        None => (mantissa, None),
    };
    if fraction.is_none() && exponent.is_none() {
        return None;
    }
    if !is_digits(integral) || (integral.len() > 1 && integral.starts_with('0')) {
        return None;
    }
    if fraction.map_or(false, |f| !is_digits(f)) {
        return None;
    }
    if let Some(exponent) = exponent {
        let unsigned = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if !is_digits(unsigned) {
            return None;
        }
    }
    format!("{}{}", sign, cleaned).parse().ok()
}
