// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamic values carried by query objects, tenant suppliers and bound
//! statement parameters.
//!
//! [`Value`] is deliberately small: it covers what SQL drivers bind and what
//! nested query payloads need for property-path access. Conversion from Rust
//! field types goes through [`ToValue`], which the `Query` derive calls for
//! every annotated field.

use std::{collections::BTreeMap, fmt};

use uuid::Uuid;

use crate::{
    error::{Error, PathError, Result},
    path::{PropertyToken, PropertyTokenizer}
};

static NULL: Value = Value::Null;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// Absent value. Predicates on null values are skipped.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Text.
    Text(String),
    /// UUID.
    Uuid(Uuid),
    /// Ordered list, used by `IN` predicates and indexed paths.
    List(Vec<Value>),
    /// Nested object keyed by property name.
    Map(BTreeMap<String, Value>)
}

impl Value {
    /// Check if the value is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the text content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None
        }
    }

    /// Integer content, if any.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Uuid(_) => "uuid",
            Self::List(_) => "list",
            Self::Map(_) => "map"
        }
    }

    /// Resolve a dotted/indexed property path against this value.
    ///
    /// Maps are traversed by key, lists by numeric index; a map may also be
    /// indexed by key (`attrs[color]`). Missing keys and out-of-range
    /// positions resolve to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPath`] when a list index is not numeric or a scalar is
    /// asked for a nested segment.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sqlmeta_core::Value;
    ///
    /// let value = Value::map([(
    ///     "arr",
    ///     Value::List(vec![Value::map([("name", Value::from("first"))])])
    /// )]);
    /// assert_eq!(value.get_path("arr[0].name").unwrap(), &Value::from("first"));
    /// ```
    pub fn get_path(&self, path: &str) -> Result<&Value> {
        let mut current = self;
        for token in PropertyTokenizer::new(path) {
            current = current.step(&token).map_err(|reason| Error::InvalidPath {
                path: path.to_owned(),
                reason
            })?;
        }
        Ok(current)
    }

    fn step(&self, token: &PropertyToken) -> Result<&Value, PathError> {
        let field = if token.name().is_empty() {
            self
        } else {
            match self {
                Self::Map(entries) => entries.get(token.name()).unwrap_or(&NULL),
                Self::Null => &NULL,
                _ => return Err(PathError::NotTraversable(token.name().to_owned()))
            }
        };

        let Some(index) = token.index() else {
            return Ok(field);
        };

        match field {
            Self::List(items) => {
                let position: usize = index
                    .trim()
                    .parse()
                    .map_err(|_| PathError::InvalidIndex(index.to_owned()))?;
                Ok(items.get(position).unwrap_or(&NULL))
            }
            Self::Map(entries) => Ok(entries.get(index).unwrap_or(&NULL)),
            Self::Null => Ok(&NULL),
            _ => Err(PathError::NotTraversable(token.indexed_name().to_owned()))
        }
    }

    /// Build a [`Value::Map`] from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Render the value as a SQL literal.
    ///
    /// Only meant for logging and debugging; statements sent to a database
    /// use bound parameters.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".to_owned(),
            Self::Bool(true) => "TRUE".to_owned(),
            Self::Bool(false) => "FALSE".to_owned(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Text(s) => quote_literal(s),
            Self::Uuid(u) => quote_literal(&u.to_string()),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(Self::to_sql_literal).collect();
                format!("({})", parts.join(", "))
            }
            Self::Map(_) => quote_literal(&self.to_string())
        }
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Conversion of Rust field values into [`Value`].
///
/// Implemented for the common scalar types, `Option<T>` (where `None` maps to
/// [`Value::Null`]) and `Vec<T>`.
pub trait ToValue {
    /// Convert to a dynamic value.
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Uuid {
    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

macro_rules! int_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_int_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    i64::try_from(*self).map_or_else(|_| Value::Text(self.to_string()), Value::Int)
                }
            }
        )*
    };
}

wide_int_to_value!(u64, usize, isize);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl<T: ToValue + ?Sized> From<&T> for Value {
    fn from(value: &T) -> Self {
        value.to_value()
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Uuid> for Value {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}
