//! Cleaning steps and the audit trail they leave.

use serde::{Deserialize, Serialize};

use crate::table::Value;

/// One step of a cleaning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CleaningStep {
    /// Normalize every column name.
    NormalizeNames,

    /// Remove columns.
    DropColumns { columns: Vec<String> },

    /// Mark sentinel cells as missing.
    ///
    /// A cell matches if its text rendering equals one of `values` or
    /// matches `pattern`.
    MarkMissing {
        column: String,
        #[serde(default)]
        values: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },

    /// Replace missing cells with a value.
    FillMissing { column: String, value: Value },

    /// Coerce one column, or every column when `column` is absent.
    CoerceNumeric {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        column: Option<String>,
    },

    /// Coerce a column to dates, with an optional chrono format.
    CoerceDate {
        column: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
}

impl CleaningStep {
    /// Get a human-readable description of the step.
    pub fn description(&self) -> String {
        match self {
            CleaningStep::NormalizeNames => "Normalize column names".to_string(),
            CleaningStep::DropColumns { columns } => {
                format!("Drop columns {}", columns.join(", "))
            }
            CleaningStep::MarkMissing {
                column,
                values,
                pattern,
            } => match pattern {
                Some(p) if values.is_empty() => {
                    format!("Mark cells matching /{}/ missing in '{}'", p, column)
                }
                Some(p) => format!(
                    "Mark {:?} and cells matching /{}/ missing in '{}'",
                    values, p, column
                ),
                None => format!("Mark {:?} missing in '{}'", values, column),
            },
            CleaningStep::FillMissing { column, value } => {
                format!("Fill missing cells in '{}' with {}", column, value)
            }
            CleaningStep::CoerceNumeric { column: Some(c) } => {
                format!("Coerce '{}' to numeric", c)
            }
            CleaningStep::CoerceNumeric { column: None } => {
                "Coerce every column to numeric".to_string()
            }
            CleaningStep::CoerceDate { column, format } => match format {
                Some(f) => format!("Coerce '{}' to date ({})", column, f),
                None => format!("Coerce '{}' to date", column),
            },
        }
    }
}

/// Result of running a pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Number of steps run.
    pub steps_applied: usize,

    /// Number of cells whose value changed.
    pub cells_changed: usize,

    /// Detailed changes, one or more per step.
    pub changes: Vec<StepChange>,
}

impl CleaningReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the report.
    pub fn add_change(&mut self, change: StepChange) {
        self.cells_changed += change.values_changed;
        self.changes.push(change);
    }

    /// Changes that touched a column.
    pub fn changes_for<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a StepChange> {
        self.changes.iter().filter(move |c| c.column == column)
    }
}

/// The effect of one step on one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepChange {
    /// Description of the step.
    pub description: String,

    /// Column affected (its name after the step).
    pub column: String,

    /// Number of cells changed.
    pub values_changed: usize,

    /// Per-row audit information.
    pub row_audits: Vec<RowAudit>,
}

/// Audit information for a single cell change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based).
    pub row: usize,

    /// Column that was changed.
    pub column: String,

    /// Value before the step.
    pub original_value: String,

    /// Value after the step.
    pub new_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_json_shape() {
        let step: CleaningStep = serde_json::from_str(
            r#"{"op": "mark_missing", "column": "release_year", "values": ["SONGFACTS.COM"]}"#,
        )
        .unwrap();
        assert!(matches!(
            step,
            CleaningStep::MarkMissing { ref column, ref values, pattern: None }
                if column == "release_year" && values == &["SONGFACTS.COM"]
        ));

        let all: CleaningStep = serde_json::from_str(r#"{"op": "coerce_numeric"}"#).unwrap();
        assert!(matches!(all, CleaningStep::CoerceNumeric { column: None }));

        let json = serde_json::to_string(&CleaningStep::NormalizeNames).unwrap();
        assert_eq!(json, r#"{"op":"normalize_names"}"#);
    }

    #[test]
    fn test_fill_value_from_json() {
        let step: CleaningStep =
            serde_json::from_str(r#"{"op": "fill_missing", "column": "year", "value": 0}"#)
                .unwrap();
        match step {
            CleaningStep::FillMissing { value, .. } => {
                assert!(value.is_identical(&Value::Integer(0)))
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_descriptions() {
        let step = CleaningStep::CoerceNumeric {
            column: Some("release_year".to_string()),
        };
        assert_eq!(step.description(), "Coerce 'release_year' to numeric");
        assert_eq!(
            CleaningStep::CoerceNumeric { column: None }.description(),
            "Coerce every column to numeric"
        );
    }
}
