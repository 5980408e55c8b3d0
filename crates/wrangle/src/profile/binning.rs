//! Equal-width binning of a numeric column.

use crate::error::{Result, WrangleError};
use crate::table::{Column, ColumnKind, Value};

/// Assign each value to one of `bins` equal-width, right-closed intervals.
///
/// The lowest edge is pushed down by 0.1% of the range so the minimum falls
/// inside the first bin. Cells get the matching label, or the interval as
/// text (`(0.079, 0.259]`) when no labels are given. Missing stays missing.
pub fn cut<S: AsRef<str>>(column: &Column, bins: usize, labels: Option<&[S]>) -> Result<Column> {
    if !column.kind().is_summarizable() {
        return Err(WrangleError::NotNumeric {
            column: column.name().to_string(),
            kind: column.kind(),
        });
    }
    if bins == 0 {
        return Err(WrangleError::Config("cut needs at least one bin".to_string()));
    }
    if let Some(labels) = labels {
        if labels.len() != bins {
            return Err(WrangleError::Config(format!(
                "{} labels given for {} bins",
                labels.len(),
                bins
            )));
        }
    }

    let Some(edges) = bin_edges(column, bins) else {
        return Ok(Column::with_kind(
            column.name(),
            ColumnKind::String,
            vec![Value::Missing; column.len()],
        ));
    };

    let names: Vec<String> = match labels {
        Some(labels) => labels.iter().map(|l| l.as_ref().to_string()).collect(),
        None => edges
            .windows(2)
            .map(|w| format!("({:.3}, {:.3}]", w[0], w[1]))
            .collect(),
    };

    let values = column
        .iter()
        .map(|value| match value.as_f64() {
            Some(x) => {
                let bin = edges[1..]
                    .iter()
                    .position(|&edge| x <= edge)
                    .unwrap_or(bins - 1);
                Value::Text(names[bin].clone())
            }
            None => Value::Missing,
        })
        .collect();

    Ok(Column::with_kind(column.name(), ColumnKind::String, values))
}

fn bin_edges(column: &Column, bins: usize) -> Option<Vec<f64>> {
    let (mut lo, mut hi) = column.numeric_values().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
    })?;

    if lo == hi {
        let pad = if lo == 0.0 { 0.001 } else { 0.001 * lo.abs() };
        lo -= pad;
        hi += pad;
        let step = (hi - lo) / bins as f64;
        return Some((0..=bins).map(|i| lo + step * i as f64).collect());
    }

    let step = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + step * i as f64).collect();
    edges[bins] = hi;
    edges[0] -= (hi - lo) * 0.001;
    Some(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atemp() -> Column {
        Column::new(
            "atemp",
            vec![
                Value::Float(0.0),
                Value::Float(0.2),
                Value::Float(0.5),
                Value::Missing,
                Value::Float(0.8),
            ],
        )
    }

    #[test]
    fn test_labelled_bins() {
        let levels = cut(&atemp(), 4, Some(&["cool", "mild", "warm", "hot"][..])).unwrap();
        let got: Vec<String> = levels.iter().map(|v| v.to_string()).collect();
        assert_eq!(got, vec!["cool", "cool", "warm", "NaN", "hot"]);
        assert_eq!(levels.kind(), ColumnKind::String);
    }

    #[test]
    fn test_interval_labels() {
        let levels = cut::<&str>(&atemp(), 2, None).unwrap();
        assert_eq!(levels.values()[0].as_str(), Some("(-0.001, 0.400]"));
        assert_eq!(levels.values()[4].as_str(), Some("(0.400, 0.800]"));
    }

    #[test]
    fn test_constant_column() {
        let col = Column::new("x", vec![Value::Float(5.0), Value::Float(5.0)]);
        let levels = cut(&col, 3, Some(&["a", "b", "c"][..])).unwrap();
        assert_eq!(levels.values()[0].as_str(), Some("b"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(cut::<&str>(&atemp(), 0, None).is_err());
        assert!(cut(&atemp(), 2, Some(&["one"][..])).is_err());
        let text = Column::from_strs("s", &["a"]);
        assert!(matches!(
            cut::<&str>(&text, 2, None),
            Err(WrangleError::NotNumeric { .. })
        ));
    }

    #[test]
    fn test_all_missing() {
        let col = Column::new("x", vec![Value::Missing]);
        let levels = cut::<&str>(&col, 2, None).unwrap();
        assert!(levels.values()[0].is_missing());
    }
}
