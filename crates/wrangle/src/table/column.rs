//! A named, homogeneously typed column.

use serde::{Deserialize, Serialize};

use super::types::ColumnKind;
use super::value::Value;

/// A named sequence of cells sharing one [`ColumnKind`].
///
/// Missing cells may appear in a column of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<Value>,
}

impl Column {
    /// Build a column, deriving its kind from the values.
    ///
    /// Integers mixed with floats are widened to floats. Any other mix of
    /// kinds makes a string column, with non-text cells rendered as text.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let values: Vec<Value> = values.into_iter().map(finite_or_missing).collect();
        let kind = values
            .iter()
            .fold(ColumnKind::Missing, |acc, v| acc.unify(v.kind()));
        let values = match kind {
            ColumnKind::Float => values.into_iter().map(widen_to_float).collect(),
            ColumnKind::String => values.into_iter().map(render_as_text).collect(),
            _ => values,
        };

        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Build a text column from string slices. No cell is treated as missing.
    pub fn from_strs(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(name, values.iter().map(|s| Value::from(*s)).collect())
    }

    /// Build a column whose kind is already known to match the values.
    pub(crate) fn with_kind(name: impl Into<String>, kind: ColumnKind, values: Vec<Value>) -> Self {
        let values: Vec<Value> = values.into_iter().map(finite_or_missing).collect();
        debug_assert!(values.iter().all(|v| v.is_missing() || v.kind() == kind));
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element kind.
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// All cells, in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the column and return its cells.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a cell by position.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterate over cells.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Non-missing numeric cells as `f64`, in row order.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(Value::as_f64)
    }

    /// The same cells under a new name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// A new column with this name and the given cells.
    pub fn with_values(&self, values: Vec<Value>) -> Self {
        Self::new(self.name.clone(), values)
    }

    /// Structural equality of name, kind and every cell.
    pub fn is_identical(&self, other: &Column) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.is_identical(b))
    }
}

/// Non-finite floats are stored as missing.
fn finite_or_missing(value: Value) -> Value {
    match value {
        Value::Float(f) if !f.is_finite() => Value::Missing,
        other => other,
    }
}

fn widen_to_float(value: Value) -> Value {
    match value {
        Value::Integer(i) => Value::Float(i as f64),
        other => other,
    }
}

fn render_as_text(value: Value) -> Value {
    match value {
        Value::Missing | Value::Text(_) => value,
        other => Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_floats_become_missing() {
        let col = Column::new(
            "release_year",
            vec![Value::Integer(1965), Value::Float(f64::NAN), Value::Float(f64::INFINITY)],
        );
        assert_eq!(col.kind(), ColumnKind::Integer);
        assert!(col.values()[1].is_missing());
        assert!(col.values()[2].is_missing());
        assert_eq!(col.missing_count(), 2);

        let col = Column::with_kind("x", ColumnKind::Float, vec![Value::Float(f64::NAN)]);
        assert!(col.values()[0].is_missing());
    }

    #[test]
    fn test_kind_inference() {
        let col = Column::new("a", vec![Value::Integer(1), Value::Missing, Value::Integer(3)]);
        assert_eq!(col.kind(), ColumnKind::Integer);
        assert_eq!(col.missing_count(), 1);

        let col = Column::new("b", vec![Value::Integer(1), Value::Float(2.5)]);
        assert_eq!(col.kind(), ColumnKind::Float);
        assert!(col.values()[0].is_identical(&Value::Float(1.0)));

        let col = Column::new("c", vec![Value::Missing, Value::Missing]);
        assert_eq!(col.kind(), ColumnKind::Missing);
    }

    #[test]
    fn test_mixed_becomes_string() {
        let col = Column::new("year", vec![Value::Integer(1965), Value::from("SONGFACTS.COM")]);
        assert_eq!(col.kind(), ColumnKind::String);
        assert_eq!(col.values()[0].as_str(), Some("1965"));
    }

    #[test]
    fn test_numeric_values_skip_missing() {
        let col = Column::new("x", vec![Value::Float(1.0), Value::Missing, Value::Float(3.0)]);
        let values: Vec<f64> = col.numeric_values().collect();
        assert_eq!(values, vec![1.0, 3.0]);
    }
}
