//! Dynamic value representation for TOML data.
//!
//! This module provides the [`Value`] enum which represents any TOML value.
//!
//! ## Core Types
//!
//! - [`Value`]: string, integer, float, boolean, date-time, array, or table
//! - [`StringValue`]: string text plus the [`StringKind`] it was written in
//! - [`ValueKind`]: the kind of a value, used in type-mismatch diagnostics
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tomlet::{StringKind, Value};
//!
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let literal = Value::string_with_kind("C:\\Users", StringKind::Literal);
//!
//! use tomlet::tomlet;
//! let table = tomlet!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use tomlet::Value;
//!
//! let value = Value::from(42);
//! let n: i64 = value.get_as().unwrap();
//! assert_eq!(n, 42);
//! assert!(value.get_as::<String>().is_err());
//! ```

use crate::{Datetime, Error, Table};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The syntax a string was written in.
///
/// The kind never affects equality; it only tells the writer how to quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum StringKind {
    /// `"..."` with escapes.
    #[default]
    Basic,
    /// `'...'` taken verbatim.
    Literal,
    /// `"""..."""` with escapes and raw newlines.
    MultilineBasic,
    /// `'''...'''` taken verbatim, raw newlines allowed.
    MultilineLiteral,
}

impl StringKind {
    #[inline]
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        matches!(self, StringKind::MultilineBasic | StringKind::MultilineLiteral)
    }

    /// The opening and closing delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> &'static str {
        match self {
            StringKind::Basic => "\"",
            StringKind::Literal => "'",
            StringKind::MultilineBasic => "\"\"\"",
            StringKind::MultilineLiteral => "'''",
        }
    }
}

/// String text together with the syntax it was written in.
///
/// # Examples
///
/// ```rust
/// use tomlet::{StringKind, StringValue};
///
/// let mut s = StringValue::new("a", StringKind::Literal);
/// s.set_value("b");
/// assert_eq!(s.as_str(), "b");
/// assert_eq!(s.kind(), StringKind::Literal);
/// assert_eq!(s, StringValue::new("b", StringKind::Basic));
/// ```
#[derive(Clone, Debug, Default)]
pub struct StringValue {
    value: String,
    kind: StringKind,
}

impl StringValue {
    pub fn new(value: impl Into<String>, kind: StringKind) -> Self {
        StringValue {
            value: value.into(),
            kind,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> StringKind {
        self.kind
    }

    /// Replaces the text. The recorded kind is kept.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.value
    }
}

impl PartialEq for StringValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for StringValue {}

/// The kind of a [`Value`], named the way diagnostics spell it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
    Array,
    Table,
}

impl ValueKind {
    /// The readable type name: `string`, `int`, `float`, `bool`, `datetime`, `array`, `table`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "int",
            ValueKind::Float => "float",
            ValueKind::Boolean => "bool",
            ValueKind::Datetime => "datetime",
            ValueKind::Array => "array",
            ValueKind::Table => "table",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any TOML value.
///
/// # Examples
///
/// ```rust
/// use tomlet::{Value, ValueKind};
///
/// let num = Value::Integer(42);
/// let text = Value::from("hello");
///
/// assert!(num.is_integer());
/// assert!(text.is_str());
/// assert_eq!(text.kind(), ValueKind::String);
/// ```
#[derive(Clone, Debug)]
pub enum Value {
    String(StringValue),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Datetime(Datetime),
    Array(Vec<Value>),
    Table(Table),
}

/// Structural equality. Floats compare by value except that any two NaNs
/// are equal, so `a = nan` reads back equal to itself.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Datetime(a), Value::Datetime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Creates a string value written in the given syntax.
    pub fn string_with_kind(value: impl Into<String>, kind: StringKind) -> Self {
        Value::String(StringValue::new(value, kind))
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Datetime(_) => ValueKind::Datetime,
            Value::Array(_) => ValueKind::Array,
            Value::Table(_) => ValueKind::Table,
        }
    }

    /// The readable type name used in diagnostics.
    #[inline]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.kind().as_str()
    }

    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::Datetime(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is a string, returns its text. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The recorded syntax of a string value.
    #[inline]
    #[must_use]
    pub fn string_kind(&self) -> Option<StringKind> {
        match self {
            Value::String(s) => Some(s.kind()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Looks up a key if this value is a table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::parse;
    ///
    /// let doc = parse("[server]\nport = 8080").unwrap();
    /// let server = doc.root().get("server").unwrap();
    /// assert_eq!(server.get("port").and_then(|v| v.as_integer()), Some(8080));
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_table().and_then(|table| table.get(key))
    }

    /// Looks up an element if this value is an array.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Converts to `T`, failing with [`Error::TypeMismatch`] if the kind is wrong.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlet::{Error, Value};
    ///
    /// let v = Value::from("8080");
    /// let err = v.get_as::<i64>().unwrap_err();
    /// assert!(matches!(err, Error::TypeMismatch { .. }));
    /// ```
    pub fn get_as<'a, T>(&'a self) -> crate::Result<T>
    where
        T: TryFrom<&'a Value, Error = Error>,
    {
        T::try_from(self)
    }
}

impl fmt::Display for Value {
    /// Renders the value as an inline TOML value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::ser::write_inline_value(&mut out, self);
        f.write_str(&out)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s.as_str()),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Datetime(dt) => serializer.collect_str(dt),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Table(table) => table.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid TOML value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(Value::Integer)
                    .map_err(|_| E::custom(format!("integer {} is out of range", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("TOML has no null value"))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = Table::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Table(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

fn mismatch(value: &Value, expected: &str) -> Error {
    Error::type_mismatch("", expected, value.type_name())
}

// TryFrom implementations for extracting values from Value
impl TryFrom<&Value> for i64 {
    type Error = Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        value.as_integer().ok_or_else(|| mismatch(value, "int"))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        value.as_float().ok_or_else(|| mismatch(value, "float"))
    }
}

impl TryFrom<&Value> for bool {
    type Error = Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        value.as_bool().ok_or_else(|| mismatch(value, "bool"))
    }
}

impl TryFrom<&Value> for String {
    type Error = Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch(value, "string"))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = Error;

    fn try_from(value: &'a Value) -> crate::Result<Self> {
        value.as_str().ok_or_else(|| mismatch(value, "string"))
    }
}

impl TryFrom<&Value> for Datetime {
    type Error = Error;

    fn try_from(value: &Value) -> crate::Result<Self> {
        value
            .as_datetime()
            .copied()
            .ok_or_else(|| mismatch(value, "datetime"))
    }
}

impl<'a> TryFrom<&'a Value> for &'a Table {
    type Error = Error;

    fn try_from(value: &'a Value) -> crate::Result<Self> {
        value.as_table().ok_or_else(|| mismatch(value, "table"))
    }
}

impl<'a> TryFrom<&'a Value> for &'a [Value] {
    type Error = Error;

    fn try_from(value: &'a Value) -> crate::Result<Self> {
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| mismatch(value, "array"))
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value.into())
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(StringValue::new(value, StringKind::Basic))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(StringValue::new(value, StringKind::Basic))
    }
}

impl From<Datetime> for Value {
    fn from(value: Datetime) -> Self {
        Value::Datetime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Table> for Value {
    fn from(value: Table) -> Self {
        Value::Table(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_i64() {
        let value = Value::Integer(42);
        let result: i64 = TryFrom::try_from(&value).unwrap();
        assert_eq!(result, 42);

        let value = Value::from("test");
        let err = i64::try_from(&value).unwrap_err();
        assert_eq!(err, Error::type_mismatch("", "int", "string"));
    }

    #[test]
    fn test_tryfrom_f64_rejects_integers() {
        assert_eq!(f64::try_from(&Value::Float(3.5)).unwrap(), 3.5);
        assert_eq!(
            f64::try_from(&Value::Integer(42)).unwrap_err(),
            Error::type_mismatch("", "float", "int")
        );
        assert_eq!(Value::Integer(42).as_float(), None);
        assert!(f64::try_from(&Value::Boolean(true)).is_err());
    }

    #[test]
    fn test_nan_equals_nan() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(-f64::NAN));
        assert_ne!(Value::Float(f64::NAN), Value::Float(1.0));
        assert_eq!(Value::Float(0.0), Value::Float(-0.0));
        assert_ne!(Value::Float(1.0), Value::Integer(1));
        assert_eq!(
            Value::Array(vec![Value::Float(f64::NAN)]),
            Value::Array(vec![Value::Float(f64::NAN)])
        );
    }

    #[test]
    fn test_tryfrom_borrowed() {
        let value = Value::from("hello");
        let s: &str = value.get_as().unwrap();
        assert_eq!(s, "hello");

        let arr = Value::Array(vec![Value::from(1), Value::from(2)]);
        let items: &[Value] = arr.get_as().unwrap();
        assert_eq!(items.len(), 2);
        assert!(arr.get_as::<&Table>().is_err());
    }

    #[test]
    fn test_string_kind_ignored_by_equality() {
        let basic = Value::string_with_kind("x", StringKind::Basic);
        let literal = Value::string_with_kind("x", StringKind::Literal);
        assert_eq!(basic, literal);
        assert_eq!(literal.string_kind(), Some(StringKind::Literal));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::from(1).type_name(), "int");
        assert_eq!(Value::from(1.5).type_name(), "float");
        assert_eq!(Value::from(true).type_name(), "bool");
        assert_eq!(Value::from("s").type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Table(Table::new()).type_name(), "table");
    }

    #[test]
    fn test_get_and_get_index() {
        let mut inner = Table::new();
        inner.insert("k", Value::Array(vec![Value::from(7)]));
        let value = Value::Table(inner);
        assert_eq!(
            value.get("k").and_then(|v| v.get_index(0)),
            Some(&Value::Integer(7))
        );
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.get_index(0), None);
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let mut table = Table::new();
        table.insert("name", Value::from("tomlet"));
        table.insert("ports", Value::Array(vec![Value::from(80), Value::from(443)]));
        let value = Value::Table(table);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"name":"tomlet","ports":[80,443]}"#);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_deserialize_rejects_null() {
        assert!(serde_json::from_str::<Value>("null").is_err());
    }
}
