//! Type coercion with coerce-or-null semantics.
//!
//! A cell that cannot be converted becomes [`Value::Missing`]. Coercion never
//! fails, which means it can silently drop data: the number of discarded
//! cells is logged at `warn` level.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::table::{Column, ColumnKind, Value};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// Optional sign, digits with an optional fraction, optional exponent.
static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap()
});

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap(), // ISO date
        Regex::new(r"^\d{2}/\d{2}/\d{4}").unwrap(), // US date
        Regex::new(r"^\d{2}-\d{2}-\d{4}").unwrap(), // European date
        Regex::new(r"^\d{4}/\d{2}/\d{2}").unwrap(), // Alt ISO
    ]
});

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a numeric literal. Returns `None` if the text is not a number.
///
/// Integers that fit in `i64` come back as [`Value::Integer`], everything
/// else as [`Value::Float`]. Surrounding whitespace is ignored.
pub fn parse_number(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if !NUMBER_PATTERN.is_match(trimmed) {
        return None;
    }

    if INTEGER_PATTERN.is_match(trimmed) {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(Value::Integer(i));
        }
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

/// Convert every cell to a number, turning failures into missing.
///
/// The result is an integer column if every surviving cell is a whole
/// integer literal, otherwise a float column. A column with nothing left is
/// a float column of missing cells. Applying this twice changes nothing.
pub fn coerce_numeric(column: &Column) -> Column {
    let mut lost = 0usize;
    let values: Vec<Value> = column
        .iter()
        .map(|value| match value {
            Value::Missing => Value::Missing,
            Value::Float(f) if !f.is_finite() => Value::Missing,
            Value::Integer(_) | Value::Float(_) => value.clone(),
            Value::Text(text) => parse_number(text).unwrap_or_else(|| {
                if !text.trim().is_empty() {
                    lost += 1;
                }
                Value::Missing
            }),
            Value::Date(_) => {
                lost += 1;
                Value::Missing
            }
        })
        .collect();

    report_loss(column.name(), "numeric", lost);

    let coerced = column.with_values(values);
    if coerced.kind() == ColumnKind::Missing {
        Column::with_kind(column.name(), ColumnKind::Float, coerced.into_values())
    } else {
        coerced
    }
}

/// Parse a date, with an explicit chrono format or by trying common ones.
pub fn parse_date(text: &str, format: Option<&str>) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if let Some(format) = format {
        return NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, format)
                    .ok()
                    .map(|dt| dt.date())
            });
    }

    if !DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(trimmed, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
                .map(|dt| dt.date())
        })
}

/// Convert every cell to a date, turning failures into missing.
pub fn coerce_date(column: &Column, format: Option<&str>) -> Column {
    let mut lost = 0usize;
    let values: Vec<Value> = column
        .iter()
        .map(|value| match value {
            Value::Missing => Value::Missing,
            Value::Date(_) => value.clone(),
            Value::Text(text) => match parse_date(text, format) {
                Some(date) => Value::Date(date),
                None => {
                    if !text.trim().is_empty() {
                        lost += 1;
                    }
                    Value::Missing
                }
            },
            Value::Integer(_) | Value::Float(_) => {
                lost += 1;
                Value::Missing
            }
        })
        .collect();

    report_loss(column.name(), "date", lost);
    Column::with_kind(column.name(), ColumnKind::Date, values)
}

/// Lossless type inference for a freshly loaded text column.
///
/// Becomes numeric only if every non-missing cell parses; otherwise the
/// column is returned unchanged.
pub fn infer_column(column: &Column) -> Column {
    if column.kind() != ColumnKind::String {
        return column.clone();
    }

    let all_numeric = column
        .iter()
        .all(|v| v.as_str().map_or(true, |s| parse_number(s).is_some()));

    if all_numeric {
        debug!(column = column.name(), "inferred numeric column");
        coerce_numeric(column)
    } else {
        column.clone()
    }
}

fn report_loss(column: &str, target: &str, lost: usize) {
    if lost > 0 {
        warn!(column, target, lost, "coercion replaced unparsable cells with missing");
    } else {
        debug!(column, target, "coercion kept every cell");
    }
}
