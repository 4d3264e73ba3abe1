//! TOML Format Reference
//!
//! This module documents the TOML syntax accepted by this library and how
//! each construct maps onto [`Value`](crate::Value).
//!
//! # Overview
//!
//! TOML is a configuration format built from key/value pairs grouped into
//! tables. Every document is a table; every value has one of seven kinds:
//!
//! | Kind | Rust type | Example |
//! |------|-----------|---------|
//! | `string` | [`StringValue`](crate::StringValue) | `name = "Tom"` |
//! | `int` | `i64` | `port = 8080` |
//! | `float` | `f64` | `ratio = 0.75` |
//! | `bool` | `bool` | `enabled = true` |
//! | `datetime` | [`Datetime`](crate::Datetime) | `dob = 1979-05-27T07:32:00Z` |
//! | `array` | `Vec<Value>` | `ports = [8080, 8081]` |
//! | `table` | [`Table`](crate::Table) | `point = { x = 1, y = 2 }` |
//!
//! # Lexical Structure
//!
//! - Whitespace is space and tab.
//! - A line ends at `\n`, `\r\n`, or a lone `\r`. A `\r` that ends the input
//!   does not start a new line.
//! - `#` starts a comment that runs to the end of the line.
//! - Positions are 1-based lines and columns; columns count characters.
//!
//! # Keys
//!
//! ```text
//! bare-key = "value"        # A-Z a-z 0-9 _ -
//! "quoted key" = "value"    # basic or literal string, single line
//! physical.color = "red"    # dotted key
//! site."google.com" = true  # quoted segment inside a dotted key
//! ```
//!
//! In a key/value line only an explicit `.` separates segments, so a
//! number-like key such as `1.0` is rejected. Inside `[headers]` the run is
//! split at every dot: `[servers.1.2]` names three tables.
//!
//! Defining the same key twice is an error, including through dotted keys.
//!
//! # Strings
//!
//! | Form | Delimiter | Escapes | Newlines |
//! |------|-----------|---------|----------|
//! | Basic | `"` | yes | no |
//! | Literal | `'` | no | no |
//! | Multi-line basic | `"""` | yes | yes |
//! | Multi-line literal | `'''` | no | yes |
//!
//! Escapes: `\b \t \n \f \r \" \\ \uXXXX \UXXXXXXXX`. In a multi-line basic
//! string, a `\` at the end of a line removes the line break and the
//! whitespace that follows it. A newline right after an opening `"""` or
//! `'''` is dropped. Up to two quote characters may appear right before the
//! closing delimiter:
//!
//! ```text
//! str = """Roses are red
//! Violets are blue"""
//! trimmed = """\
//!     The quick \
//!     brown fox."""
//! quoted = """Here are two quotation marks: "". Simple enough."""
//! regex = '<\i\c*\s*>'
//! ```
//!
//! The form a string was written in is kept as its
//! [`StringKind`](crate::StringKind) and reproduced when writing. Literal
//! forms fall back to the matching basic form when the text contains
//! characters they cannot hold.
//!
//! # Numbers
//!
//! ```text
//! int1 = +99
//! int2 = 1_000
//! hex = 0xDEAD_BEEF
//! oct = 0o755
//! bin = 0b1101
//! flt1 = -3.1415
//! flt2 = 5e+22
//! flt3 = 6.626e-34
//! special = [inf, -inf, nan]
//! ```
//!
//! Underscores must sit between two digits. Decimal integers have no leading
//! zeros. Integers are 64-bit signed; out-of-range values are invalid.
//!
//! # Date-Times
//!
//! ```text
//! odt = 1979-05-27T07:32:00Z
//! odt2 = 1979-05-27 00:32:00.999-07:00
//! ldt = 1979-05-27T07:32:00
//! ld = 1979-05-27
//! lt = 07:32:00
//! ```
//!
//! # Arrays
//!
//! ```text
//! integers = [ 1, 2, 3 ]
//! nested = [ [ 1, 2 ], ["a", "b"] ]
//! multiline = [
//!   1,
//!   2, # comments are allowed
//! ]
//! ```
//!
//! By default every element must have the kind of the first element
//! (`[1, "a"]` is an error). Nested arrays all count as `array`, so their
//! contents may differ. [`ParseOptions::relaxed`](crate::ParseOptions::relaxed)
//! lifts the restriction.
//!
//! # Tables
//!
//! ```text
//! [owner]
//! name = "Tom"
//!
//! [servers.alpha]      # creates `servers` implicitly
//! ip = "10.0.0.1"
//!
//! [[products]]         # array of tables
//! name = "Hammer"
//!
//! [[products]]
//! name = "Nail"
//! ```
//!
//! **Rules**:
//! - A header may open a table only once
//! - A table created implicitly by a longer header may be opened once later
//! - Tables created by dotted keys or inline tables cannot be opened by a header
//! - `[[name]]` cannot extend an array written with `[...]`
//!
//! ## Inline Tables
//!
//! ```text
//! point = { x = 1, y = 2 }
//! animal = { type.name = "pug" }
//! ```
//!
//! Inline tables fit on one line, take no trailing comma, and are closed to
//! later additions.
//!
//! # Writing
//!
//! [`to_string`](crate::to_string) emits plain key/value lines first, then one
//! section per standard table or array of tables. The recorded
//! [`TableStyle`](crate::TableStyle) decides between `[header]`, `a.b = 1`,
//! and `{ ... }`. A table holding only sub-tables gets no header of its own.
//!
//! # Limitations
//!
//! - Comments and whitespace are not preserved
//! - No `null`: TOML has no such value
//! - Integers beyond the `i64` range are rejected
