//! # tomlet
//!
//! A TOML parser and writer that keeps track of how things were written.
//!
//! ## Key Features
//!
//! - **Positioned errors**: every failure carries the 1-based line and column
//!   of the offending token and renders as `Line {L}, Column {C}: {message}`
//! - **Round trips**: string forms (basic, literal, multi-line) and table
//!   styles (header, dotted, inline) are recorded and reproduced on output
//! - **Ordered tables**: keys keep the order they were written in
//! - **Typed access**: kind-checked getters and path-aware [`Node`] views
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use tomlet::parse;
//!
//! let doc = parse(r#"
//! title = "Example"
//!
//! [server]
//! host = '127.0.0.1'
//! ports = [8080, 8081]
//! "#).unwrap();
//!
//! let server = doc.root().get("server").unwrap();
//! assert_eq!(server.get("host").and_then(|v| v.as_str()), Some("127.0.0.1"));
//!
//! let port: i64 = doc.node().get("server").unwrap().get("ports").unwrap().at(0).unwrap().get_as().unwrap();
//! assert_eq!(port, 8080);
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use tomlet::{parse, ErrorKind};
//!
//! let err = parse("X = [1, 'X']").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::ArrayElementTypeMismatch);
//! assert_eq!(
//!     err.to_string(),
//!     "Line 1, Column 9: Expected value of type 'int' but value of type 'string' was found."
//! );
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use tomlet::{tomlet, to_string, Value};
//!
//! let value = tomlet!({
//!     "name": "tomlet",
//!     "owner": { "login": "tom" }
//! });
//! if let Value::Table(table) = value {
//!     assert_eq!(to_string(&table), "name = \"tomlet\"\n\n[owner]\nlogin = \"tom\"\n");
//! }
//! ```
//!
//! ## Logging
//!
//! The parser reports through [`tracing`]: `debug` events when a document is
//! parsed or fails, `trace` events for table headers and nesting. No
//! subscriber is installed by the library.
//!
//! ## Format Reference
//!
//! See the [`format`] module for the accepted syntax.

pub mod cursor;
pub mod datetime;
pub mod document;
pub mod error;
pub mod format;
pub mod lexer;
pub mod macros;
pub mod options;
pub mod parser;
pub mod ser;
pub mod table;
pub mod token;
pub mod value;

pub use cursor::Position;
pub use datetime::Datetime;
pub use document::{Document, Node};
pub use error::{Error, ErrorKind, ParseError, Result};
pub use lexer::Tokenizer;
pub use options::ParseOptions;
pub use table::{Table, TableStyle};
pub use token::{Token, TokenKind};
pub use value::{StringKind, StringValue, Value, ValueKind};

use tracing::debug;

/// Parses TOML text into a [`Document`].
///
/// # Examples
///
/// ```rust
/// use tomlet::parse;
///
/// let doc = parse("answer = 42").unwrap();
/// assert_eq!(doc.root().get("answer").and_then(|v| v.as_integer()), Some(42));
/// ```
///
/// # Errors
///
/// Returns the first [`ParseError`] in the input. No partial tree is kept.
pub fn parse(text: &str) -> std::result::Result<Document, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// Parses TOML text with custom [`ParseOptions`].
///
/// # Examples
///
/// ```rust
/// use tomlet::{parse_with_options, ParseOptions};
///
/// let doc = parse_with_options("a = [1, 'b']", ParseOptions::relaxed()).unwrap();
/// assert_eq!(doc.options(), ParseOptions::relaxed());
/// ```
///
/// # Errors
///
/// Returns the first [`ParseError`] in the input.
pub fn parse_with_options(
    text: &str,
    options: ParseOptions,
) -> std::result::Result<Document, ParseError> {
    debug!(bytes = text.len(), "parsing document");
    let root = parser::Parser::with_options(text, options).parse()?;
    Ok(Document::new(root, options))
}

/// Writes a table as TOML text.
///
/// Parsing the output again yields an equal table.
///
/// # Examples
///
/// ```rust
/// use tomlet::{parse, to_string};
///
/// let doc = parse("[a]\nb = 1").unwrap();
/// assert_eq!(to_string(doc.root()), "[a]\nb = 1\n");
/// ```
#[must_use]
pub fn to_string(table: &Table) -> String {
    let mut writer = ser::Writer::new();
    writer.write_table(table);
    writer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_write() {
        let doc = parse("a = 1\n[b]\nc = 'x'").unwrap();
        assert_eq!(doc.to_string(), "a = 1\n\n[b]\nc = 'x'\n");
    }

    #[test]
    fn test_empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.root().is_empty());
        assert_eq!(to_string(doc.root()), "");

        let doc = parse("# only a comment\n\n").unwrap();
        assert!(doc.root().is_empty());
    }

    #[test]
    fn test_error_through_crate_error() {
        let err: Error = parse("=").unwrap_err().into();
        assert_eq!(err.as_parse_error().map(ParseError::kind), Some(ErrorKind::KeyIsMissing));
    }

    #[test]
    fn test_documents_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Document>();
        assert_send_sync::<Value>();
        assert_send_sync::<ParseError>();
    }
}
