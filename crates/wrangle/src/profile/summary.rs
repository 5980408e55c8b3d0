//! Descriptive summary of numeric columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WrangleError};
use crate::table::{Column, ColumnKind, NumericTable};

// =============================================================================
// RUNNING STATISTICS
// =============================================================================
// Welford's online algorithm for mean and variance in a single pass.

#[derive(Debug, Clone)]
struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
    min: f64,
    max: f64,
}

impl RunningStats {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Sample standard deviation; undefined below two observations.
    fn std(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some((self.m2 / (self.count - 1) as f64).sqrt())
        }
    }
}

/// Order and moment statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation, absent with fewer than two values.
    pub std: Option<f64>,
    /// First quartile (25th percentile).
    pub q1: f64,
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
}

/// Statistics for a column, or the explicit absence of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Stats {
    /// Every cell was missing.
    NoData,
    /// At least one value was present.
    Observed(NumericStatistics),
}

impl Stats {
    /// The statistics, if any data was observed.
    pub fn observed(&self) -> Option<&NumericStatistics> {
        match self {
            Stats::Observed(stats) => Some(stats),
            Stats::NoData => None,
        }
    }

    /// Minimum, if any data was observed.
    pub fn min(&self) -> Option<f64> {
        self.observed().map(|s| s.min)
    }

    /// Maximum, if any data was observed.
    pub fn max(&self) -> Option<f64> {
        self.observed().map(|s| s.max)
    }
}

/// Summary of one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Number of non-missing values.
    pub count: usize,
    /// Number of missing values.
    pub missing: usize,
    pub stats: Stats,
}

/// Per-column summaries, in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

impl Summary {
    /// Get a column summary by name.
    pub fn get(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns true if no columns were summarized.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of summarized columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(6);

        writeln!(
            f,
            "{:<width$} {:>8} {:>12} {:>12} {:>12} {:>12}",
            "column", "count", "mean", "std", "min", "max"
        )?;
        for column in &self.columns {
            match &column.stats {
                Stats::NoData => writeln!(
                    f,
                    "{:<width$} {:>8} {:>12} {:>12} {:>12} {:>12}",
                    column.name, column.count, "-", "-", "-", "-"
                )?,
                Stats::Observed(s) => writeln!(
                    f,
                    "{:<width$} {:>8} {:>12.3} {:>12} {:>12.3} {:>12.3}",
                    column.name,
                    column.count,
                    s.mean,
                    s.std.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".to_string()),
                    s.min,
                    s.max
                )?,
            }
        }
        Ok(())
    }
}

/// Summarize every column of a numeric table.
///
/// Missing cells are excluded from every statistic. An all-missing column
/// summarizes to [`Stats::NoData`]; a table with no columns gives an empty
/// summary.
pub fn describe(table: &NumericTable) -> Summary {
    let columns = table.columns().iter().map(summarize_column).collect();
    Summary { columns }
}

fn summarize_column(column: &Column) -> ColumnSummary {
    let mut values: Vec<f64> = column.numeric_values().collect();
    let missing = column.len() - values.len();

    let stats = if values.is_empty() {
        Stats::NoData
    } else {
        let mut running = RunningStats::new();
        for &v in &values {
            running.add(v);
        }
        values.sort_by(f64::total_cmp);

        Stats::Observed(NumericStatistics {
            min: running.min,
            max: running.max,
            mean: running.mean,
            std: running.std(),
            q1: interpolate(&values, 0.25),
            median: interpolate(&values, 0.5),
            q3: interpolate(&values, 0.75),
        })
    };

    ColumnSummary {
        name: column.name().to_string(),
        kind: column.kind(),
        count: values.len(),
        missing,
        stats,
    }
}

/// Linear-interpolated quantile of sorted, non-empty values.
fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Quantile `q` (0 to 1) of a numeric column, ignoring missing cells.
///
/// `None` when the column has no values.
pub fn quantile(column: &Column, q: f64) -> Result<Option<f64>> {
    Ok(quantiles(column, &[q])?.pop().flatten())
}

/// Several quantiles of a numeric column at once.
pub fn quantiles(column: &Column, qs: &[f64]) -> Result<Vec<Option<f64>>> {
    if !column.kind().is_summarizable() {
        return Err(WrangleError::NotNumeric {
            column: column.name().to_string(),
            kind: column.kind(),
        });
    }
    if let Some(bad) = qs.iter().find(|q| !(0.0..=1.0).contains(*q)) {
        return Err(WrangleError::Config(format!(
            "quantile {} is outside [0, 1]",
            bad
        )));
    }

    let mut values: Vec<f64> = column.numeric_values().collect();
    values.sort_by(f64::total_cmp);

    Ok(qs
        .iter()
        .map(|&q| (!values.is_empty()).then(|| interpolate(&values, q)))
        .collect())
}

/// Smallest and largest value across every column of a numeric table.
pub fn overall_range(table: &NumericTable) -> Option<(f64, f64)> {
    table
        .columns()
        .iter()
        .flat_map(|c| c.numeric_values())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Table, Value};

    fn numeric(columns: Vec<Column>) -> NumericTable {
        NumericTable::try_from(Table::new(columns).unwrap()).unwrap()
    }

    #[test]
    fn test_missing_excluded() {
        let table = numeric(vec![Column::new(
            "release_year",
            vec![Value::Integer(1965), Value::Missing, Value::Integer(1971)],
        )]);
        let summary = describe(&table);
        let year = summary.get("release_year").unwrap();

        assert_eq!(year.count, 2);
        assert_eq!(year.missing, 1);
        assert_eq!(year.stats.min(), Some(1965.0));
        assert_eq!(year.stats.max(), Some(1971.0));
        assert_eq!(year.stats.observed().unwrap().mean, 1968.0);
    }

    #[test]
    fn test_nan_counted_as_missing() {
        let table = numeric(vec![Column::new(
            "release_year",
            vec![Value::Integer(1965), Value::Float(f64::NAN), Value::Integer(1971)],
        )]);
        let summary = describe(&table);
        let year = summary.get("release_year").unwrap();
        let stats = year.stats.observed().unwrap();

        assert_eq!(year.count, 2);
        assert_eq!(year.missing, 1);
        assert_eq!(stats.mean, 1968.0);
        assert_eq!(stats.q3, 1969.5);
        assert!(stats.std.is_some_and(f64::is_finite));
    }

    #[test]
    fn test_all_missing_is_no_data() {
        let table = numeric(vec![Column::new("x", vec![Value::Missing, Value::Missing])]);
        let summary = describe(&table);
        assert_eq!(summary.get("x").unwrap().stats, Stats::NoData);
        assert_eq!(summary.get("x").unwrap().stats.min(), None);
    }

    #[test]
    fn test_empty_table() {
        let summary = describe(&NumericTable::default());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_quartiles_interpolate() {
        let col = Column::new(
            "atemp",
            (1..=5).map(|i| Value::Float(i as f64)).collect(),
        );
        let stats = summarize_column(&col);
        let s = stats.stats.observed().unwrap();
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q3, 4.0);
        assert!((s.std.unwrap() - 1.5811388).abs() < 1e-6);

        let qs = quantiles(&col, &[0.1, 0.9]).unwrap();
        assert!((qs[0].unwrap() - 1.4).abs() < 1e-9);
        assert!((qs[1].unwrap() - 4.6).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_has_no_std() {
        let col = Column::new("x", vec![Value::Float(2.0)]);
        let s = summarize_column(&col);
        assert_eq!(s.stats.observed().unwrap().std, None);
    }

    #[test]
    fn test_quantile_errors() {
        let text = Column::from_strs("s", &["a"]);
        assert!(matches!(quantile(&text, 0.5), Err(WrangleError::NotNumeric { .. })));

        let col = Column::new("x", vec![Value::Float(1.0)]);
        assert!(matches!(quantile(&col, 1.5), Err(WrangleError::Config(_))));
        assert_eq!(quantile(&Column::new("e", vec![Value::Missing]), 0.5).unwrap(), None);
    }

    #[test]
    fn test_overall_range() {
        let table = numeric(vec![
            Column::new("a", vec![Value::Integer(3), Value::Integer(9)]),
            Column::new("b", vec![Value::Float(-1.5), Value::Missing]),
        ]);
        assert_eq!(overall_range(&table), Some((-1.5, 9.0)));
        assert_eq!(overall_range(&NumericTable::default()), None);
    }
}
