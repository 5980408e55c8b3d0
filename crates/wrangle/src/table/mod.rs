//! In-memory table model: cells, typed columns and tables.

mod column;
mod frame;
mod types;
mod value;

pub use column::Column;
pub use frame::{NumericTable, Row, Table};
pub use types::ColumnKind;
pub use value::Value;
