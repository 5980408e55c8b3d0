//! The cleaning core: name normalization, null/sentinel repair and coercion.

mod coerce;
mod names;
mod repair;

pub use coerce::{coerce_date, coerce_numeric, infer_column, parse_date, parse_number};
pub use names::{normalize_name, normalize_names};
pub use repair::{
    fill_masked, is_null_like, mark_missing, null_mask, replace_where, CellPredicate,
    NullPredicate,
};
