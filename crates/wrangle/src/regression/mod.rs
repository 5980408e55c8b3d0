//! Simple linear regression of one feature against one target.

mod ols;
mod split;

pub use ols::{paired_values, LinearRegression};
pub use split::{train_test_split, Split};
