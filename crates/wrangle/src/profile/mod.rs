//! Dataset profiling: descriptive summaries, counts, quantiles and binning.

mod binning;
mod counts;
mod summary;

pub use binning::cut;
pub use counts::{null_counts, total_nulls, value_counts};
pub use summary::{
    describe, overall_range, quantile, quantiles, ColumnSummary, NumericStatistics, Stats,
    Summary,
};
