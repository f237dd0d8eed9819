//! Raw column values carried in cursors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single sort-key value at a cursor position.
///
/// Values are positionally aligned with the sort keys of the query that
/// produced them. `Null` is a first-class value: rows whose sort column is
/// NULL still have a well-defined position in the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorValue {
    /// String value.
    String(String),
    /// Integer value.
    Number(i64),
    /// Floating point value.
    Decimal(f64),
    /// Boolean value.
    Boolean(bool),
    /// SQL NULL.
    Null,
}

impl CursorValue {
    /// Returns true for `CursorValue::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, CursorValue::Null)
    }

    /// Returns the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CursorValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CursorValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CursorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorValue::String(s) => write!(f, "'{}'", s),
            CursorValue::Number(n) => write!(f, "{}", n),
            CursorValue::Decimal(d) => write!(f, "{}", d),
            CursorValue::Boolean(b) => write!(f, "{}", b),
            CursorValue::Null => write!(f, "NULL"),
        }
    }
}

impl From<&str> for CursorValue {
    fn from(s: &str) -> Self {
        CursorValue::String(s.to_string())
    }
}

impl From<String> for CursorValue {
    fn from(s: String) -> Self {
        CursorValue::String(s)
    }
}

impl From<i64> for CursorValue {
    fn from(n: i64) -> Self {
        CursorValue::Number(n)
    }
}

impl From<i32> for CursorValue {
    fn from(n: i32) -> Self {
        CursorValue::Number(i64::from(n))
    }
}

impl From<f64> for CursorValue {
    fn from(n: f64) -> Self {
        CursorValue::Decimal(n)
    }
}

impl From<bool> for CursorValue {
    fn from(b: bool) -> Self {
        CursorValue::Boolean(b)
    }
}

impl From<()> for CursorValue {
    fn from(_: ()) -> Self {
        CursorValue::Null
    }
}

impl<T: Into<CursorValue>> From<Option<T>> for CursorValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CursorValue::Null)
    }
}
