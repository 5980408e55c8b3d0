//! Cell values and the missing marker.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::ColumnKind;

/// A single cell.
///
/// `Missing` behaves like a floating-point NaN: it is never equal to, less
/// than or greater than anything, itself included. Use [`Value::is_missing`]
/// to detect it and [`Value::is_identical`] for structural comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No data.
    Missing,
    /// A whole number.
    Integer(i64),
    /// A floating-point number. Columns store non-finite floats as `Missing`.
    Float(f64),
    /// A calendar date.
    Date(NaiveDate),
    /// Free text.
    Text(String),
}

impl Value {
    /// Returns true if this is the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The column kind this value belongs to.
    pub fn kind(&self) -> ColumnKind {
        match self {
            Value::Missing => ColumnKind::Missing,
            Value::Integer(_) => ColumnKind::Integer,
            Value::Float(_) => ColumnKind::Float,
            Value::Date(_) => ColumnKind::Date,
            Value::Text(_) => ColumnKind::String,
        }
    }

    /// Numeric view of an integer or float cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text view of a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Structural equality: same variant and same payload.
    ///
    /// Unlike `==`, two missing markers are identical, and `Integer(1)` is
    /// not identical to `Float(1.0)`.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Missing, Value::Missing) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Render the cell for delimited output; missing becomes an empty field.
    pub fn to_field(&self) -> String {
        match self {
            Value::Missing => String::new(),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Missing, _) | (_, Value::Missing) => false,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Missing, _) | (_, Value::Missing) => None,
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => f.write_str("NaN"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        if !x.is_finite() {
            Value::Missing
        } else {
            Value::Float(x)
        }
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}
