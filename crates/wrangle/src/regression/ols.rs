//! Single-feature ordinary least squares.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WrangleError};
use crate::table::Table;

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    /// Closed-form least-squares fit.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        check_lengths(x, y)?;
        if x.len() < 2 {
            return Err(WrangleError::InsufficientData(format!(
                "need at least 2 points to fit a line, got {}",
                x.len()
            )));
        }

        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let (sxy, sxx) = x
            .iter()
            .zip(y)
            .fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
                let dx = xi - mean_x;
                (sxy + dx * (yi - mean_y), sxx + dx * dx)
            });

        if sxx == 0.0 {
            return Err(WrangleError::Degenerate(
                "feature has zero variance".to_string(),
            ));
        }

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;
        debug!(slope, intercept, points = x.len(), "fitted linear regression");

        Ok(Self { slope, intercept })
    }

    /// Fit `y_column` against `x_column`, skipping rows where either is missing.
    pub fn fit_columns(table: &Table, x_column: &str, y_column: &str) -> Result<Self> {
        let (x, y) = paired_values(table, x_column, y_column)?;
        Self::fit(&x, &y)
    }

    /// Predict one value.
    pub fn predict_one(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Predict many values.
    pub fn predict(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&v| self.predict_one(v)).collect()
    }

    /// Coefficient of determination on `(x, y)`.
    ///
    /// `None` when `y` is constant.
    pub fn r_squared(&self, x: &[f64], y: &[f64]) -> Result<Option<f64>> {
        check_lengths(x, y)?;
        if y.is_empty() {
            return Ok(None);
        }

        let mean_y = y.iter().sum::<f64>() / y.len() as f64;
        let ss_tot: f64 = y.iter().map(|v| (v - mean_y).powi(2)).sum();
        let ss_res: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, yi)| (yi - self.predict_one(xi)).powi(2))
            .sum();

        Ok((ss_tot > 0.0).then(|| 1.0 - ss_res / ss_tot))
    }

    /// Mean squared error on `(x, y)`.
    pub fn mean_squared_error(&self, x: &[f64], y: &[f64]) -> Result<Option<f64>> {
        check_lengths(x, y)?;
        if y.is_empty() {
            return Ok(None);
        }
        let sum: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, yi)| (yi - self.predict_one(xi)).powi(2))
            .sum();
        Ok(Some(sum / y.len() as f64))
    }
}

/// Numeric values of two columns, keeping only rows where both are present.
pub fn paired_values(table: &Table, x_column: &str, y_column: &str) -> Result<(Vec<f64>, Vec<f64>)> {
    let xs = table.require_column(x_column)?;
    let ys = table.require_column(y_column)?;
    for column in [xs, ys] {
        if !column.kind().is_summarizable() {
            return Err(WrangleError::NotNumeric {
                column: column.name().to_string(),
                kind: column.kind(),
            });
        }
    }

    Ok(xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some((x.as_f64()?, y.as_f64()?)))
        .unzip())
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(WrangleError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}
