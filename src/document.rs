//! Parsed documents and path-aware traversal.
//!
//! A [`Document`] owns the root table of one parse. [`Node`] is a borrowed
//! view of one value inside it: it remembers the document it came from and
//! the key path that led to it, so lookup failures can say where they
//! happened.
//!
//! ```rust
//! use tomlet::{parse, Error};
//!
//! let doc = parse("[server]\nports = [8080, 8081]").unwrap();
//! let port: i64 = doc.node().get("server").unwrap().get("ports").unwrap().at(1).unwrap().get_as().unwrap();
//! assert_eq!(port, 8081);
//!
//! let err = doc.node().get("server").unwrap().get("host").unwrap_err();
//! assert_eq!(err, Error::KeyNotFound("server.host".into()));
//! ```

use crate::options::ParseOptions;
use crate::ser::{format_key_path, Writer};
use crate::value::ValueKind;
use crate::{Error, Result, Table, Value};
use serde::{Serialize, Serializer};
use std::fmt;

/// The result of a successful parse.
#[derive(Clone, Debug, Default)]
pub struct Document {
    root: Table,
    options: ParseOptions,
}

impl Document {
    pub(crate) fn new(root: Table, options: ParseOptions) -> Self {
        Document { root, options }
    }

    /// The root table.
    #[must_use]
    pub fn root(&self) -> &Table {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Table {
        &mut self.root
    }

    #[must_use]
    pub fn into_root(self) -> Table {
        self.root
    }

    /// The options this document was parsed with.
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// A view of the root table.
    #[must_use]
    pub fn node(&self) -> Node<'_> {
        Node {
            document: self,
            target: Target::Root(&self.root),
            path: String::new(),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl From<Table> for Document {
    fn from(root: Table) -> Self {
        Document::new(root, ParseOptions::default())
    }
}

impl fmt::Display for Document {
    /// Writes the document as TOML text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::new();
        writer.write_table(&self.root);
        f.write_str(&writer.into_inner())
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root.serialize(serializer)
    }
}

#[derive(Clone, Copy, Debug)]
enum Target<'doc> {
    Root(&'doc Table),
    Value(&'doc Value),
}

/// A borrowed view of a value inside a [`Document`].
///
/// The path uses TOML key syntax with array indices in brackets, such as
/// `servers.alpha.ports[1]`. The root's path is empty.
#[derive(Clone, Debug)]
pub struct Node<'doc> {
    document: &'doc Document,
    target: Target<'doc>,
    path: String,
}

impl<'doc> Node<'doc> {
    /// The document this node belongs to.
    #[must_use]
    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// The value under this node, or `None` for the root.
    #[must_use]
    pub fn value(&self) -> Option<&'doc Value> {
        match self.target {
            Target::Root(_) => None,
            Target::Value(value) => Some(value),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self.target {
            Target::Root(_) => ValueKind::Table,
            Target::Value(value) => value.kind(),
        }
    }

    #[must_use]
    pub fn as_table(&self) -> Option<&'doc Table> {
        match self.target {
            Target::Root(table) => Some(table),
            Target::Value(value) => value.as_table(),
        }
    }

    /// Looks up `key` in this node's table.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if this node is not a table,
    /// [`Error::KeyNotFound`] with the full path if the key is absent.
    pub fn get(&self, key: &str) -> Result<Node<'doc>> {
        let table = self
            .as_table()
            .ok_or_else(|| Error::type_mismatch(&self.path, "table", self.kind().as_str()))?;
        let segment = format_key_path(&[key.to_string()]);
        let path = if self.path.is_empty() {
            segment
        } else {
            format!("{}.{}", self.path, segment)
        };
        match table.get(key) {
            Some(value) => Ok(self.child(value, path)),
            None => Err(Error::KeyNotFound(path)),
        }
    }

    /// Looks up element `index` in this node's array.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if this node is not an array,
    /// [`Error::IndexOutOfBounds`] if `index` is past the end.
    pub fn at(&self, index: usize) -> Result<Node<'doc>> {
        let items = self
            .value()
            .and_then(Value::as_array)
            .ok_or_else(|| Error::type_mismatch(&self.path, "array", self.kind().as_str()))?;
        match items.get(index) {
            Some(value) => Ok(self.child(value, format!("{}[{}]", self.path, index))),
            None => Err(Error::IndexOutOfBounds {
                path: self.path.clone(),
                index,
                len: items.len(),
            }),
        }
    }

    /// Converts the value to `T`, reporting mismatches with this node's path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::{parse, Error};
    ///
    /// let doc = parse("[db]\nport = '5432'").unwrap();
    /// let err = doc.node().get("db").unwrap().get("port").unwrap().get_as::<i64>().unwrap_err();
    /// assert_eq!(err, Error::type_mismatch("db.port", "int", "string"));
    /// ```
    pub fn get_as<T>(&self) -> Result<T>
    where
        T: TryFrom<&'doc Value, Error = Error>,
    {
        match self.target {
            Target::Value(value) => T::try_from(value).map_err(|err| self.locate(err)),
            Target::Root(_) => Err(Error::type_mismatch(
                &self.path,
                std::any::type_name::<T>(),
                ValueKind::Table.as_str(),
            )),
        }
    }

    fn child(&self, value: &'doc Value, path: String) -> Node<'doc> {
        Node {
            document: self.document,
            target: Target::Value(value),
            path,
        }
    }

    fn locate(&self, err: Error) -> Error {
        match err {
            Error::TypeMismatch { expected, found, .. } => Error::TypeMismatch {
                path: self.path.clone(),
                expected,
                found,
            },
            other => other,
        }
    }
}
