//! Seeded train/test split.

use serde::Serialize;

use crate::error::{Result, WrangleError};

/// Features and targets divided into training and test sets.
#[derive(Debug, Clone, Serialize)]
pub struct Split {
    pub x_train: Vec<f64>,
    pub x_test: Vec<f64>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Shuffle pairs with a seeded generator and hold out a fraction for testing.
///
/// The test set has `ceil(n * test_fraction)` pairs. The same seed always
/// produces the same split.
pub fn train_test_split(x: &[f64], y: &[f64], test_fraction: f64, seed: u64) -> Result<Split> {
    if x.len() != y.len() {
        return Err(WrangleError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(WrangleError::Config(format!(
            "test fraction {} must be between 0 and 1",
            test_fraction
        )));
    }

    let n = x.len();
    let test_len = (n as f64 * test_fraction).ceil() as usize;
    if test_len == 0 || test_len >= n {
        return Err(WrangleError::InsufficientData(format!(
            "cannot split {} rows with test fraction {}",
            n, test_fraction
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = fastrand::Rng::with_seed(seed);
    rng.shuffle(&mut indices);

    let (test_idx, train_idx) = indices.split_at(test_len);
    let pick = |idx: &[usize], source: &[f64]| -> Vec<f64> {
        idx.iter().map(|&i| source[i]).collect()
    };

    Ok(Split {
        x_train: pick(train_idx, x),
        x_test: pick(test_idx, x),
        y_train: pick(train_idx, y),
        y_test: pick(test_idx, y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_and_pairing() {
        let x: Vec<f64> = (0..9).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v * 10.0).collect();
        let split = train_test_split(&x, &y, 1.0 / 3.0, 0).unwrap();

        assert_eq!(split.x_test.len(), 3);
        assert_eq!(split.x_train.len(), 6);
        for (xi, yi) in split.x_train.iter().zip(&split.y_train) {
            assert_eq!(*yi, xi * 10.0);
        }

        let mut all: Vec<f64> = split.x_train.iter().chain(&split.x_test).copied().collect();
        all.sort_by(f64::total_cmp);
        assert_eq!(all, x);
    }

    #[test]
    fn test_deterministic() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let a = train_test_split(&x, &x, 0.25, 42).unwrap();
        let b = train_test_split(&x, &x, 0.25, 42).unwrap();
        assert_eq!(a.x_test, b.x_test);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(train_test_split(&[1.0, 2.0], &[1.0], 0.5, 0).is_err());
        assert!(train_test_split(&[1.0, 2.0], &[1.0, 2.0], 1.0, 0).is_err());
        assert!(matches!(
            train_test_split(&[1.0], &[1.0], 0.5, 0),
            Err(WrangleError::InsufficientData(_))
        ));
    }
}
