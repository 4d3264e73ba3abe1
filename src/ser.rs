//! TOML writing.
//!
//! This module provides the [`Writer`] that turns a [`Table`] back into TOML
//! text, and the inline rendering used by `Value`'s `Display`.
//!
//! ## Overview
//!
//! The writer follows the recorded syntax wherever the text allows it:
//!
//! - **Strings** keep their [`StringKind`]; literal forms fall back to the
//!   matching basic form when the text cannot be written literally
//! - **Standard tables** become `[header]` sections after the plain keys
//! - **Arrays of standard tables** become `[[header]]` sections
//! - **Dotted tables** are flattened to `a.b = value` lines
//! - **Inline tables** stay `{ key = value }`
//!
//! ## Usage
//!
//! ```rust
//! use tomlet::{parse, to_string};
//!
//! let doc = parse("name = 'tomlet'\n[deps]\nserde = \"1.0\"").unwrap();
//! assert_eq!(to_string(doc.root()), "name = 'tomlet'\n\n[deps]\nserde = \"1.0\"\n");
//! ```

use crate::lexer::{is_bare_key_char, starts_number};
use crate::table::{Table, TableStyle};
use crate::value::{StringKind, Value};
use std::fmt::Write as _;

/// The TOML writer.
///
/// Accumulates text in an internal buffer. Created via [`Writer::new`].
///
/// ```rust
/// use tomlet::ser::Writer;
/// use tomlet::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("port", Value::from(8080));
///
/// let mut writer = Writer::new();
/// writer.write_table(&table);
/// assert_eq!(writer.into_inner(), "port = 8080\n");
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    output: String,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            output: String::with_capacity(256),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `table` as a document root.
    pub fn write_table(&mut self, table: &Table) {
        let mut path = Vec::new();
        self.write_section(table, &mut path);
    }

    fn write_section(&mut self, table: &Table, path: &mut Vec<String>) {
        let mut deferred = Vec::new();
        let mut prefix = Vec::new();
        self.write_entries(table, &mut prefix, &mut deferred);

        for (relative, value) in deferred {
            let depth = path.len();
            path.extend(relative);
            match value {
                Value::Table(table) => {
                    if table.is_empty() || writes_lines(table) {
                        self.write_header(path, false);
                    }
                    self.write_section(table, path);
                }
                Value::Array(items) => {
                    for item in items {
                        if let Value::Table(table) = item {
                            self.write_header(path, true);
                            self.write_section(table, path);
                        }
                    }
                }
                _ => {}
            }
            path.truncate(depth);
        }
    }

    /// Writes plain `key = value` lines, flattening dotted tables. Sections
    /// are collected with their path relative to the current one and
    /// returns whether any line was written.
    ///
    /// Reading the text back inserts entries that wrote lines before entries
    /// that only exist through headers. Sections are collected in that same
    /// order so a second write produces identical text.
    fn write_entries<'t>(
        &mut self,
        table: &'t Table,
        prefix: &mut Vec<String>,
        deferred: &mut Vec<(Vec<String>, &'t Value)>,
    ) -> bool {
        let mut wrote = false;
        let mut headers_only = Vec::new();
        for (key, value) in table {
            prefix.push(key.clone());
            match value {
                Value::Table(inner) if inner.style() == TableStyle::Dotted && !inner.is_empty() => {
                    let mut nested = Vec::new();
                    if self.write_entries(inner, prefix, &mut nested) {
                        wrote = true;
                        deferred.append(&mut nested);
                    } else {
                        headers_only.append(&mut nested);
                    }
                }
                v if is_section(v) => headers_only.push((prefix.clone(), v)),
                v => {
                    self.output.push_str(&format_line_key(prefix));
                    self.output.push_str(" = ");
                    write_inline_value(&mut self.output, v);
                    self.output.push('\n');
                    wrote = true;
                }
            }
            prefix.pop();
        }
        deferred.append(&mut headers_only);
        wrote
    }

    fn write_header(&mut self, path: &[String], array: bool) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let (open, close) = if array { ("[[", "]]") } else { ("[", "]") };
        self.output.push_str(open);
        self.output.push_str(&format_key_path(path));
        self.output.push_str(close);
        self.output.push('\n');
    }
}

/// Returns `true` for values written under their own header.
fn is_section(value: &Value) -> bool {
    match value {
        Value::Table(table) => table.style() == TableStyle::Standard,
        Value::Array(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|v| matches!(v, Value::Table(t) if t.style() == TableStyle::Standard))
        }
        _ => false,
    }
}

/// Returns `true` if `table` has anything to write before its sub-sections.
/// A table without such lines needs no header of its own.
fn writes_lines(table: &Table) -> bool {
    table.values().any(|value| match value {
        Value::Table(inner) if inner.style() == TableStyle::Dotted && !inner.is_empty() => {
            writes_lines(inner)
        }
        v => !is_section(v),
    })
}

/// Renders a key path such as `servers."alpha.local".ip`.
pub(crate) fn format_key_path(path: &[String]) -> String {
    let mut out = String::new();
    for (i, key) in path.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        write_key(&mut out, key);
    }
    out
}

/// Renders the key of a `key = value` line. A leading segment that starts
/// like a number would be read together with the dots after it, so it is
/// quoted.
fn format_line_key(path: &[String]) -> String {
    match path.split_first() {
        Some((first, rest)) if !rest.is_empty() && starts_number(first) => {
            let mut out = String::new();
            write_basic(&mut out, first);
            for key in rest {
                out.push('.');
                write_key(&mut out, key);
            }
            out
        }
        _ => format_key_path(path),
    }
}

fn write_key(out: &mut String, key: &str) {
    if !key.is_empty() && key.chars().all(is_bare_key_char) {
        out.push_str(key);
    } else {
        write_basic(out, key);
    }
}

/// Writes `value` in inline form, as it would appear after `=`.
pub(crate) fn write_inline_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => write_string(out, s.as_str(), s.kind()),
        Value::Integer(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(f) => write_float(out, *f),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Datetime(dt) => {
            let _ = write!(out, "{}", dt);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_inline_value(out, item);
            }
            out.push(']');
        }
        Value::Table(table) => write_inline_table(out, table),
    }
}

fn write_inline_table(out: &mut String, table: &Table) {
    if table.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    let mut first = true;
    write_inline_entries(out, table, &mut Vec::new(), &mut first);
    out.push_str(" }");
}

fn write_inline_entries(out: &mut String, table: &Table, prefix: &mut Vec<String>, first: &mut bool) {
    for (key, value) in table {
        prefix.push(key.clone());
        match value {
            Value::Table(inner) if inner.style() == TableStyle::Dotted && !inner.is_empty() => {
                write_inline_entries(out, inner, prefix, first);
            }
            _ => {
                if !*first {
                    out.push_str(", ");
                }
                *first = false;
                out.push_str(&format_line_key(prefix));
                out.push_str(" = ");
                write_inline_value(out, value);
            }
        }
        prefix.pop();
    }
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("nan");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "inf" } else { "-inf" });
    } else {
        // `{:?}` always keeps a fraction or exponent, so the text reads back as a float.
        let _ = write!(out, "{:?}", f);
    }
}

#[inline]
fn is_control(c: char) -> bool {
    (c < ' ' && c != '\t') || c == '\u{7f}'
}

fn write_string(out: &mut String, text: &str, kind: StringKind) {
    match kind {
        StringKind::Basic => write_basic(out, text),
        StringKind::Literal if fits_literal(text) => {
            out.push('\'');
            out.push_str(text);
            out.push('\'');
        }
        StringKind::Literal => write_basic(out, text),
        StringKind::MultilineBasic => write_multiline_basic(out, text),
        StringKind::MultilineLiteral if fits_multiline_literal(text) => {
            out.push_str("'''");
            push_opening_newline(out, text);
            out.push_str(text);
            out.push_str("'''");
        }
        StringKind::MultilineLiteral => write_multiline_basic(out, text),
    }
}

fn fits_literal(text: &str) -> bool {
    !text.contains('\'') && !text.chars().any(is_control)
}

fn fits_multiline_literal(text: &str) -> bool {
    !text.contains("'''")
        && !text.ends_with('\'')
        && !text.replace("\r\n", "\n").chars().any(|c| c != '\n' && is_control(c))
}

/// Multi-line text starts on the line after the opening delimiter. That
/// newline is dropped when read back.
fn push_opening_newline(out: &mut String, text: &str) {
    if text.contains('\n') {
        out.push('\n');
    }
}

fn write_basic(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        escape_char(out, ch);
    }
    out.push('"');
}

fn write_multiline_basic(out: &mut String, text: &str) {
    out.push_str("\"\"\"");
    push_opening_newline(out, text);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' => out.push('\n'),
            '\r' if chars.peek() == Some(&'\n') => out.push('\r'),
            _ => escape_char(out, ch),
        }
    }
    out.push_str("\"\"\"");
}

fn escape_char(out: &mut String, ch: char) {
    match ch {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        c if is_control(c) => {
            let _ = write!(out, "\\u{:04X}", c as u32);
        }
        c => out.push(c),
    }
}
