//! Null and sentinel repair.
//!
//! Repair is split into two stages that callers invoke separately:
//! build a mask with [`null_mask`], then either rewrite the masked cells to
//! the missing marker ([`mark_missing`]) or give them a concrete value
//! ([`fill_masked`]). A sentinel such as `SONGFACTS.COM` in a year column is
//! first marked missing; zero-filling it afterwards is a separate choice.

use crate::error::{Result, WrangleError};
use crate::table::{Column, ColumnKind, Value};

/// Decides whether a cell should be repaired.
pub trait CellPredicate {
    /// Returns true if the cell matches.
    fn matches(&self, value: &Value) -> bool;
}

impl<F> CellPredicate for F
where
    F: Fn(&Value) -> bool,
{
    fn matches(&self, value: &Value) -> bool {
        self(value)
    }
}

/// Built-in predicates.
#[derive(Debug, Clone, Default)]
pub enum NullPredicate {
    /// The cell is the missing marker.
    #[default]
    IsMissing,
    /// The cell equals this value (missing never matches).
    Equals(Value),
    /// The cell is text equal to one of these strings.
    OneOf(Vec<String>),
    /// The cell is missing or text commonly used for "no value"
    /// (`NA`, `n/a`, `null`, `none`, `nil`, `.`, `-`, blank).
    NullLike,
}

impl CellPredicate for NullPredicate {
    fn matches(&self, value: &Value) -> bool {
        match self {
            NullPredicate::IsMissing => value.is_missing(),
            NullPredicate::Equals(expected) => value == expected,
            NullPredicate::OneOf(candidates) => value
                .as_str()
                .is_some_and(|s| candidates.iter().any(|c| c == s)),
            NullPredicate::NullLike => {
                value.is_missing() || value.as_str().is_some_and(is_null_like)
            }
        }
    }
}

/// Check if a string represents a missing/null value.
pub fn is_null_like(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}

/// One boolean per cell, true exactly where the predicate holds.
pub fn null_mask(column: &Column, predicate: &impl CellPredicate) -> Vec<bool> {
    column.iter().map(|v| predicate.matches(v)).collect()
}

/// Rewrite masked cells to the missing marker. The column keeps its kind.
pub fn mark_missing(column: &Column, mask: &[bool]) -> Result<Column> {
    check_mask(column, mask)?;
    let values = column
        .iter()
        .zip(mask)
        .map(|(v, &hit)| if hit { Value::Missing } else { v.clone() })
        .collect();
    Ok(Column::with_kind(column.name(), column.kind(), values))
}

/// Put `fill` in every masked cell, leaving the rest unchanged.
///
/// The fill is conformed to the column kind: an integer fill in a float
/// column is stored as a float, a float fill widens an integer column, and a
/// number or date filled into a string column is stored as its text. Any
/// other combination is [`WrangleError::FillKind`].
pub fn fill_masked(column: &Column, mask: &[bool], fill: Value) -> Result<Column> {
    check_mask(column, mask)?;

    let fill = conform_fill(column, fill)?;
    let values = column
        .iter()
        .zip(mask)
        .map(|(v, &hit)| if hit { fill.clone() } else { v.clone() })
        .collect();
    Ok(column.with_values(values))
}

/// Mask with `predicate` and fill in one call.
pub fn replace_where(
    column: &Column,
    predicate: &impl CellPredicate,
    fill: Value,
) -> Result<Column> {
    let mask = null_mask(column, predicate);
    fill_masked(column, &mask, fill)
}

fn check_mask(column: &Column, mask: &[bool]) -> Result<()> {
    if mask.len() != column.len() {
        return Err(WrangleError::LengthMismatch {
            expected: column.len(),
            actual: mask.len(),
        });
    }
    Ok(())
}

fn conform_fill(column: &Column, fill: Value) -> Result<Value> {
    let kind = column.kind();
    let compatible = match (kind, fill.kind()) {
        (_, ColumnKind::Missing) | (ColumnKind::Missing, _) => true,
        (a, b) if a == b => true,
        (a, b) if a.is_numeric() && b.is_numeric() => true,
        (ColumnKind::String, _) => {
            return Ok(Value::Text(fill.to_string()));
        }
        _ => false,
    };

    if compatible {
        Ok(fill)
    } else {
        Err(WrangleError::FillKind {
            column: column.name().to_string(),
            kind,
            value: fill.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years() -> Column {
        Column::new(
            "release_year",
            vec![Value::Missing, Value::Integer(1980), Value::Missing],
        )
    }

    #[test]
    fn test_mask_marks_missing() {
        assert_eq!(
            null_mask(&years(), &NullPredicate::IsMissing),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_fill_zero() {
        let col = years();
        let mask = null_mask(&col, &NullPredicate::IsMissing);
        let filled = fill_masked(&col, &mask, Value::Integer(0)).unwrap();
        let expected = Column::new(
            "release_year",
            vec![Value::Integer(0), Value::Integer(1980), Value::Integer(0)],
        );
        assert!(filled.is_identical(&expected));
    }

    #[test]
    fn test_mask_without_fill_leaves_missing() {
        let col = years();
        let mask = null_mask(&col, &NullPredicate::IsMissing);
        let marked = mark_missing(&col, &mask).unwrap();
        assert!(marked.is_identical(&col));
    }

    #[test]
    fn test_sentinel_then_fill_are_separate() {
        let col = Column::from_strs("release_year", &["1965", "SONGFACTS.COM", "1971"]);
        let sentinel = NullPredicate::Equals(Value::from("SONGFACTS.COM"));
        let mask = null_mask(&col, &sentinel);
        assert_eq!(mask, vec![false, true, false]);

        let marked = mark_missing(&col, &mask).unwrap();
        assert!(marked.values()[1].is_missing());
        assert_eq!(marked.kind(), ColumnKind::String);

        let filled = fill_masked(&marked, &mask, Value::Integer(0)).unwrap();
        assert_eq!(filled.values()[1].as_str(), Some("0"));
    }

    #[test]
    fn test_one_of_matches_listed_text_only() {
        let col = Column::new(
            "release_year",
            vec![
                Value::from("SONGFACTS.COM"),
                Value::from("unknown"),
                Value::from("1971"),
                Value::Missing,
            ],
        );
        let sentinels = NullPredicate::OneOf(vec!["SONGFACTS.COM".to_string(), "unknown".to_string()]);
        let mask = null_mask(&col, &sentinels);
        assert_eq!(mask, vec![true, true, false, false]);

        let numbers = Column::new("n", vec![Value::Integer(1971)]);
        assert_eq!(null_mask(&numbers, &NullPredicate::OneOf(vec!["1971".to_string()])), vec![false]);
    }

    #[test]
    fn test_closure_predicate() {
        let col = Column::new("x", vec![Value::Integer(-999), Value::Integer(3)]);
        let mask = null_mask(&col, &|v: &Value| *v == Value::Integer(-999));
        assert_eq!(mask, vec![true, false]);
    }

    #[test]
    fn test_float_fill_widens_integer_column() {
        let filled = replace_where(&years(), &NullPredicate::IsMissing, Value::Float(0.5)).unwrap();
        assert_eq!(filled.kind(), ColumnKind::Float);
        assert!(filled.values()[1].is_identical(&Value::Float(1980.0)));
    }

    #[test]
    fn test_incompatible_fill() {
        let err = replace_where(&years(), &NullPredicate::IsMissing, Value::from("zero")).unwrap_err();
        assert!(matches!(err, WrangleError::FillKind { .. }));
    }

    #[test]
    fn test_mask_length_checked() {
        let err = fill_masked(&years(), &[true], Value::Integer(0)).unwrap_err();
        assert!(matches!(err, WrangleError::LengthMismatch { expected: 3, actual: 1 }));
    }

    #[test]
    fn test_null_like() {
        assert!(is_null_like(""));
        assert!(is_null_like("NA"));
        assert!(is_null_like("n/a"));
        assert!(is_null_like(" null "));
        assert!(is_null_like("."));
        assert!(!is_null_like("0"));
        assert!(!is_null_like("value"));
    }
}
