//! Column kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element kind of a column, chosen when the column is built or coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Text values.
    String,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Calendar dates.
    Date,
    /// Every cell is missing; no kind could be determined.
    Missing,
}

impl ColumnKind {
    /// Returns true if this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Returns true if a summary can be computed over this kind.
    ///
    /// An all-missing column counts, it just summarizes to no data.
    pub fn is_summarizable(&self) -> bool {
        self.is_numeric() || *self == ColumnKind::Missing
    }

    /// The kind that can hold values of both `self` and `other`.
    pub fn unify(self, other: ColumnKind) -> ColumnKind {
        use ColumnKind::*;
        match (self, other) {
            (a, b) if a == b => a,
            (Missing, k) | (k, Missing) => k,
            (Integer, Float) | (Float, Integer) => Float,
            _ => String,
        }
    }
}

impl Default for ColumnKind {
    fn default() -> Self {
        ColumnKind::Missing
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::String => "string",
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Date => "date",
            ColumnKind::Missing => "missing",
        };
        f.write_str(name)
    }
}
