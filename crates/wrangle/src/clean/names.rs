//! Column name normalization.

use std::collections::HashMap;

use crate::error::{Result, WrangleError};
use crate::table::Table;

/// Normalize one column name.
///
/// Lowercases, turns spaces into underscores, then strips `*` and `?`.
/// Nothing else is touched.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .replace('*', "")
        .replace('?', "")
}

/// Normalize a sequence of column names, preserving order.
///
/// Fails with [`WrangleError::NameCollision`] if two different raw names
/// end up with the same normalized name.
pub fn normalize_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(names.len());
    let mut normalized = Vec::with_capacity(names.len());

    for raw in names {
        let raw = raw.as_ref();
        let name = normalize_name(raw);
        if let Some(first) = seen.insert(name.clone(), raw) {
            return Err(WrangleError::NameCollision {
                first: first.to_string(),
                second: raw.to_string(),
                normalized: name,
            });
        }
        normalized.push(name);
    }

    Ok(normalized)
}

impl Table {
    /// A copy of the table with every column name normalized.
    pub fn normalize_column_names(&self) -> Result<Table> {
        let names = normalize_names(&self.column_names())?;
        self.clone().with_column_names(names)
    }
}
