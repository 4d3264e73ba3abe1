//! Configuration options for TOML parsing.
//!
//! [`ParseOptions`] controls the checks the parser applies on top of the
//! grammar. The defaults follow TOML 1.0 as published:
//!
//! - arrays must be homogeneous (every element has the kind of the first)
//! - arrays and inline tables nest at most 128 levels deep
//!
//! ## Examples
//!
//! ```rust
//! use tomlet::{parse, parse_with_options, ParseOptions};
//!
//! let text = "mixed = [1, 'two']";
//! assert!(parse(text).is_err());
//!
//! let doc = parse_with_options(text, ParseOptions::relaxed()).unwrap();
//! assert_eq!(doc.root().get("mixed").and_then(|v| v.as_array()).map(Vec::len), Some(2));
//! ```

/// Default limit on how deeply arrays and inline tables may nest.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for parsing.
///
/// # Examples
///
/// ```rust
/// use tomlet::ParseOptions;
///
/// // TOML 1.0 rules
/// let options = ParseOptions::new();
///
/// // Mixed-kind arrays allowed, as in TOML 1.1
/// let options = ParseOptions::relaxed();
///
/// // Custom configuration
/// let options = ParseOptions::new()
///     .with_homogeneous_arrays(false)
///     .with_max_depth(16);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub homogeneous_arrays: bool,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            homogeneous_arrays: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options (homogeneous arrays, depth limit of 128).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert!(options.homogeneous_arrays);
    /// assert_eq!(options.max_depth, 128);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that accept arrays mixing value kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::ParseOptions;
    ///
    /// let options = ParseOptions::relaxed();
    /// assert!(!options.homogeneous_arrays);
    /// ```
    #[must_use]
    pub fn relaxed() -> Self {
        ParseOptions {
            homogeneous_arrays: false,
            ..Default::default()
        }
    }

    /// Sets whether every array element must have the kind of the first one.
    #[must_use]
    pub fn with_homogeneous_arrays(mut self, homogeneous: bool) -> Self {
        self.homogeneous_arrays = homogeneous;
        self
    }

    /// Sets how many arrays and inline tables may be open at once.
    ///
    /// Exceeding the limit fails with
    /// [`ErrorKind::NestingTooDeep`](crate::ErrorKind::NestingTooDeep).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::{parse_with_options, ErrorKind, ParseOptions};
    ///
    /// let options = ParseOptions::new().with_max_depth(2);
    /// assert!(parse_with_options("a = [[1]]", options).is_ok());
    ///
    /// let err = parse_with_options("a = [[[1]]]", options).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    /// assert_eq!(err.column(), 7);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
