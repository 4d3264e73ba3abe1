//! Ordered table type for TOML documents.
//!
//! This module provides [`Table`], a wrapper around [`IndexMap`] that keeps
//! keys in insertion order and records how the table was written
//! ([`TableStyle`]).
//!
//! ## Why IndexMap?
//!
//! - **Stable output**: the writer emits keys in the order they were read
//! - **Iteration order**: entries iterate in insertion order
//!
//! Equality ignores both order and style: two tables are equal when they hold
//! the same keys mapped to equal values.
//!
//! ## Examples
//!
//! ```rust
//! use tomlet::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert("name", Value::from("Alice"));
//! table.insert("age", Value::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Value;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// How a table appears in TOML text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TableStyle {
    /// Introduced by a `[header]`, or implied by one. Also the root table.
    #[default]
    Standard,
    /// Written as `{ key = value, ... }`.
    Inline,
    /// Created by dotted keys such as `a.b = 1`.
    Dotted,
}

/// An insertion-ordered map of string keys to TOML values.
///
/// # Examples
///
/// ```rust
/// use tomlet::{Table, TableStyle, Value};
///
/// let mut map = Table::new();
/// map.insert("first", Value::from(1));
/// map.insert("second", Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// assert_eq!(map.style(), TableStyle::Standard);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: IndexMap<String, Value>,
    style: TableStyle,
}

impl Table {
    /// Creates an empty standard table.
    #[must_use]
    pub fn new() -> Self {
        Table::default()
    }

    /// Creates an empty table that will be written in the given style.
    #[must_use]
    pub fn with_style(style: TableStyle) -> Self {
        Table {
            entries: IndexMap::new(),
            style,
        }
    }

    /// Creates an empty inline table.
    #[must_use]
    pub fn inline() -> Self {
        Table::with_style(TableStyle::Inline)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
            style: TableStyle::Standard,
        }
    }

    /// The syntax style recorded for this table.
    #[inline]
    #[must_use]
    pub fn style(&self) -> TableStyle {
        self.style
    }

    /// Inserts a key-value pair, replacing any previous value for the key.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::{Table, Value};
    ///
    /// let mut map = Table::new();
    /// assert!(map.insert("key", Value::from(42)).is_none());
    /// assert!(map.insert("key", Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Inserts a key-value pair only if the key is absent.
    ///
    /// On a duplicate the table is left unchanged and the rejected value is
    /// handed back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::{Table, Value};
    ///
    /// let mut map = Table::new();
    /// assert!(map.try_insert("key", Value::from(1)).is_ok());
    /// assert_eq!(map.try_insert("key", Value::from(2)), Err(Value::from(2)));
    /// assert_eq!(map.get("key"), Some(&Value::from(1)));
    /// ```
    pub fn try_insert(&mut self, key: impl Into<String>, value: Value) -> Result<&mut Value, Value> {
        match self.entries.entry(key.into()) {
            Entry::Occupied(_) => Err(value),
            Entry::Vacant(slot) => Ok(slot.insert(value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns the value for `key`, inserting the result of `default` first if absent.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        self.entries.entry(key.to_string()).or_insert_with(default)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl From<HashMap<String, Value>> for Table {
    fn from(map: HashMap<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Table> for HashMap<String, Value> {
    fn from(table: Table) -> Self {
        table.entries.into_iter().collect()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Table {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            style: TableStyle::Standard,
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(serde::de::Error::custom(format!(
                "expected a table, found {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order_and_style() {
        let mut a = Table::new();
        a.insert("x", Value::from(1));
        a.insert("y", Value::from(2));

        let mut b = Table::inline();
        b.insert("y", Value::from(2));
        b.insert("x", Value::from(1));

        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut table: Table = vec![
            ("a", Value::from(1)),
            ("b", Value::from(2)),
            ("c", Value::from(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.remove("b"), Some(Value::from(2)));
        let keys: Vec<_> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut table = Table::new();
        *table.get_or_insert_with("n", || Value::from(1)) = Value::from(5);
        let existing = table.get_or_insert_with("n", || Value::from(9));
        assert_eq!(existing, &Value::from(5));
    }
}
