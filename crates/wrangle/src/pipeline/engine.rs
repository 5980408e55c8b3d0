//! Runs a list of cleaning steps over a table.

use regex::Regex;
use tracing::{debug, info};

use super::config::PipelineConfig;
use super::operations::{CleaningReport, CleaningStep, RowAudit, StepChange};
use crate::clean::{
    coerce_date, coerce_numeric, fill_masked, mark_missing, null_mask, NullPredicate,
};
use crate::error::Result;
use crate::table::{Column, Table, Value};

/// Applies cleaning steps in order.
///
/// Every step takes the current table by value and returns a new one; a
/// failing step aborts the run and no partial result is returned.
#[derive(Debug, Clone, Default)]
pub struct CleaningPipeline {
    steps: Vec<CleaningStep>,
}

impl CleaningPipeline {
    /// Create a pipeline from steps.
    pub fn new(steps: Vec<CleaningStep>) -> Self {
        Self { steps }
    }

    /// Create a pipeline from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.steps.clone())
    }

    /// The steps, in order.
    pub fn steps(&self) -> &[CleaningStep] {
        &self.steps
    }

    /// Run every step and report what changed.
    pub fn run(&self, table: Table) -> Result<(Table, CleaningReport)> {
        let mut report = CleaningReport::new();
        let mut table = table;

        for step in &self.steps {
            table = apply_step(step, table, &mut report)?;
            report.steps_applied += 1;
            debug!(step = %step.description(), "applied cleaning step");
        }

        info!(
            steps = report.steps_applied,
            cells_changed = report.cells_changed,
            "cleaning pipeline finished"
        );
        Ok((table, report))
    }
}

fn apply_step(step: &CleaningStep, table: Table, report: &mut CleaningReport) -> Result<Table> {
    match step {
        CleaningStep::NormalizeNames => {
            let before: Vec<String> = table.column_names().into_iter().map(String::from).collect();
            let renamed = table.normalize_column_names()?;
            for (old, new) in before.iter().zip(renamed.column_names()) {
                if old != new {
                    report.add_change(StepChange {
                        description: format!("Rename '{}' to '{}'", old, new),
                        column: new.to_string(),
                        values_changed: 0,
                        row_audits: Vec::new(),
                    });
                }
            }
            Ok(renamed)
        }

        CleaningStep::DropColumns { columns } => {
            let dropped = table.drop_columns(columns)?;
            for column in columns {
                report.add_change(StepChange {
                    description: format!("Drop column '{}'", column),
                    column: column.clone(),
                    values_changed: 0,
                    row_audits: Vec::new(),
                });
            }
            Ok(dropped)
        }

        CleaningStep::MarkMissing {
            column,
            values,
            pattern,
        } => {
            let regex = pattern.as_deref().map(Regex::new).transpose()?;
            let is_sentinel = |value: &Value| {
                if value.is_missing() {
                    return false;
                }
                let text = value.to_field();
                values.iter().any(|v| *v == text)
                    || regex.as_ref().is_some_and(|r| r.is_match(&text))
            };

            let original = table.require_column(column)?;
            let mask = null_mask(original, &is_sentinel);
            let repaired = mark_missing(original, &mask)?;
            record(report, step, original, &repaired);
            table.with_column(repaired)
        }

        CleaningStep::FillMissing { column, value } => {
            let original = table.require_column(column)?;
            let mask = null_mask(original, &NullPredicate::IsMissing);
            let filled = fill_masked(original, &mask, value.clone())?;
            record(report, step, original, &filled);
            table.with_column(filled)
        }

        CleaningStep::CoerceNumeric { column: Some(column) } => {
            let original = table.require_column(column)?;
            let coerced = coerce_numeric(original);
            record(report, step, original, &coerced);
            table.with_column(coerced)
        }

        CleaningStep::CoerceNumeric { column: None } => {
            let names: Vec<String> = table.column_names().into_iter().map(String::from).collect();
            let mut table = table;
            for name in &names {
                let original = table.require_column(name)?;
                let coerced = coerce_numeric(original);
                record(report, step, original, &coerced);
                table = table.with_column(coerced)?;
            }
            Ok(table)
        }

        CleaningStep::CoerceDate { column, format } => {
            let original = table.require_column(column)?;
            let coerced = coerce_date(original, format.as_deref());
            record(report, step, original, &coerced);
            table.with_column(coerced)
        }
    }
}

/// Add a change entry for every cell that differs between two versions of a
/// column. Nothing is recorded when the column is unchanged.
fn record(report: &mut CleaningReport, step: &CleaningStep, before: &Column, after: &Column) {
    let row_audits: Vec<RowAudit> = before
        .iter()
        .zip(after.iter())
        .enumerate()
        .filter(|(_, (old, new))| !old.is_identical(new))
        .map(|(row, (old, new))| RowAudit {
            row,
            column: after.name().to_string(),
            original_value: old.to_string(),
            new_value: new.to_string(),
        })
        .collect();

    if row_audits.is_empty() {
        return;
    }

    report.add_change(StepChange {
        description: step.description(),
        column: after.name().to_string(),
        values_changed: row_audits.len(),
        row_audits,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnKind;
    use crate::WrangleError;

    fn songs() -> Table {
        Table::new(vec![
            Column::from_strs(
                "Song Clean",
                &["Caught Up in You", "Fantasy Girl", "Hold On Loosely"],
            ),
            Column::from_strs("ARTIST CLEAN", &[".38 Special", ".38 Special", ".38 Special"]),
            Column::new(
                "Release Year",
                vec![Value::from("1982"), Value::Missing, Value::from("SONGFACTS.COM")],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_rock_songs_pipeline() {
        let pipeline = CleaningPipeline::from_config(&PipelineConfig::rock_songs());
        let (table, report) = pipeline.run(songs()).unwrap();

        assert_eq!(table.column_names(), vec!["song_clean", "artist_clean", "release_year"]);
        let years = table.column("release_year").unwrap();
        assert_eq!(years.kind(), ColumnKind::Integer);
        assert!(years.values()[0].is_identical(&Value::Integer(1982)));
        assert!(years.values()[1].is_missing());
        assert!(years.values()[2].is_missing());

        assert_eq!(report.steps_applied, 3);
        let marked: Vec<&StepChange> = report
            .changes_for("release_year")
            .filter(|c| c.description.starts_with("Mark"))
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].row_audits[0].row, 2);
        assert_eq!(marked[0].row_audits[0].original_value, "SONGFACTS.COM");
        assert_eq!(marked[0].row_audits[0].new_value, "NaN");
    }

    #[test]
    fn test_fill_after_repair() {
        let pipeline = CleaningPipeline::new(vec![
            CleaningStep::NormalizeNames,
            CleaningStep::MarkMissing {
                column: "release_year".to_string(),
                values: Vec::new(),
                pattern: Some(r"^[A-Z.]+$".to_string()),
            },
            CleaningStep::CoerceNumeric { column: None },
            CleaningStep::FillMissing {
                column: "release_year".to_string(),
                value: Value::Integer(0),
            },
        ]);
        let (table, _) = pipeline.run(songs()).unwrap();

        let years: Vec<Option<f64>> = table
            .column("release_year")
            .unwrap()
            .iter()
            .map(Value::as_f64)
            .collect();
        assert_eq!(years, vec![Some(1982.0), Some(0.0), Some(0.0)]);

        // Coercing every column also wipes out the text columns.
        assert_eq!(table.column("song_clean").unwrap().missing_count(), 3);
    }

    #[test]
    fn test_missing_column_aborts() {
        let pipeline = CleaningPipeline::new(vec![CleaningStep::CoerceDate {
            column: "Date".to_string(),
            format: None,
        }]);
        assert!(matches!(
            pipeline.run(songs()),
            Err(WrangleError::ColumnNotFound(c)) if c == "Date"
        ));
    }

    #[test]
    fn test_bad_pattern() {
        let pipeline = CleaningPipeline::new(vec![CleaningStep::MarkMissing {
            column: "Release Year".to_string(),
            values: Vec::new(),
            pattern: Some("(".to_string()),
        }]);
        assert!(matches!(pipeline.run(songs()), Err(WrangleError::Regex(_))));
    }

    #[test]
    fn test_drop_columns() {
        let pipeline = CleaningPipeline::new(vec![CleaningStep::DropColumns {
            columns: vec!["ARTIST CLEAN".to_string()],
        }]);
        let (table, report) = pipeline.run(songs()).unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.cells_changed, 0);
    }
}
