//! Table, row views and the numeric-only table.

use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::error::{Result, WrangleError};

use super::column::Column;
use super::types::ColumnKind;
use super::value::Value;

/// An ordered set of named, equal-length columns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(WrangleError::DuplicateColumn(column.name().to_string()));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(WrangleError::LengthMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { columns })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Returns true if the table has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consume the table and return its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// All column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Name and kind of every column.
    pub fn kinds(&self) -> Vec<(&str, ColumnKind)> {
        self.columns.iter().map(|c| (c.name(), c.kind())).collect()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Get a column by name, failing if it does not exist.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| WrangleError::ColumnNotFound(name.to_string()))
    }

    /// Get a column by position.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Replace the column with the same name, or append it.
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(WrangleError::LengthMismatch {
                expected: self.row_count(),
                actual: column.len(),
            });
        }

        match self.column_index(column.name()) {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        Ok(self)
    }

    /// Keep only the named columns, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|n| self.require_column(n.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }

    /// Remove the named columns. Every name must exist.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        for name in names {
            self.require_column(name.as_ref())?;
        }
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|n| n.as_ref() == c.name()))
            .cloned()
            .collect();
        Ok(Self { columns })
    }

    /// Rename every column positionally.
    pub fn with_column_names(self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.columns.len() {
            return Err(WrangleError::LengthMismatch {
                expected: self.columns.len(),
                actual: names.len(),
            });
        }
        let columns = self
            .columns
            .into_iter()
            .zip(names)
            .map(|(column, name)| column.renamed(name))
            .collect();
        Self::new(columns)
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name(), c.values().iter().take(n).cloned().collect()))
            .collect();
        Self { columns }
    }

    /// Positional row access.
    pub fn row(&self, index: usize) -> Result<Row<'_>> {
        let len = self.row_count();
        if index >= len {
            return Err(WrangleError::RowOutOfBounds { index, len });
        }
        Ok(Row { table: self, index })
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.row_count()).map(move |index| Row { table: self, index })
    }

    /// Keep the numeric and all-missing columns.
    pub fn numeric_only(&self) -> NumericTable {
        let columns = self
            .columns
            .iter()
            .filter(|c| c.kind().is_summarizable())
            .cloned()
            .collect();
        NumericTable(Self { columns })
    }

    /// Structural equality of every column.
    pub fn is_identical(&self, other: &Table) -> bool {
        self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(&other.columns)
                .all(|(a, b)| a.is_identical(b))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.iter().map(ToString::to_string).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, values)| {
                values
                    .iter()
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(c.name().chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c.name(), w = *w))
            .collect();
        writeln!(f, "{}", header.join("  "))?;

        for row in 0..self.row_count() {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(values, w)| format!("{:>w$}", values[row], w = *w))
                .collect();
            writeln!(f, "{}", line.join("  "))?;
        }
        Ok(())
    }
}

/// A read-only view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Row<'a> {
    /// Position of this row in its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell in the named column.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.table.column(column).and_then(|c| c.get(self.index))
    }

    /// Cell in the named column, failing if the column does not exist.
    pub fn require(&self, column: &str) -> Result<&'a Value> {
        self.table
            .require_column(column)
            .map(|c| &c.values()[self.index])
    }

    /// Cell at a column position.
    pub fn get_at(&self, position: usize) -> Option<&'a Value> {
        self.table
            .column_at(position)
            .and_then(|c| c.get(self.index))
    }

    /// `(column name, cell)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let index = self.index;
        self.table
            .columns()
            .iter()
            .map(move |c| (c.name(), &c.values()[index]))
    }
}

/// A table whose columns are all numeric or entirely missing.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NumericTable(Table);

impl NumericTable {
    /// Unwrap into the underlying table.
    pub fn into_inner(self) -> Table {
        self.0
    }
}

impl TryFrom<Table> for NumericTable {
    type Error = WrangleError;

    fn try_from(table: Table) -> Result<Self> {
        if let Some(bad) = table.columns().iter().find(|c| !c.kind().is_summarizable()) {
            return Err(WrangleError::NotNumeric {
                column: bad.name().to_string(),
                kind: bad.kind(),
            });
        }
        Ok(Self(table))
    }
}

impl Deref for NumericTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock() -> Table {
        Table::new(vec![
            Column::from_strs("song_clean", &["Caught Up in You", "Fantasy Girl"]),
            Column::from_strs("artist_clean", &[".38 Special", ".38 Special"]),
            Column::new("release_year", vec![Value::Integer(1982), Value::Missing]),
        ])
        .unwrap()
    }

    #[test]
    fn test_shape_and_kinds() {
        let table = rock();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.kinds()[2], ("release_year", ColumnKind::Integer));
    }

    #[test]
    fn test_rejects_duplicates_and_ragged() {
        let dup = Table::new(vec![Column::from_strs("a", &["1"]), Column::from_strs("a", &["2"])]);
        assert!(matches!(dup, Err(WrangleError::DuplicateColumn(_))));

        let ragged = Table::new(vec![Column::from_strs("a", &["1"]), Column::from_strs("b", &[])]);
        assert!(matches!(ragged, Err(WrangleError::LengthMismatch { expected: 1, actual: 0 })));
    }

    #[test]
    fn test_row_access() {
        let table = rock();
        let row = table.row(1).unwrap();
        assert_eq!(row.get("song_clean").and_then(Value::as_str), Some("Fantasy Girl"));
        assert!(row.get("release_year").unwrap().is_missing());
        assert!(matches!(table.row(2), Err(WrangleError::RowOutOfBounds { index: 2, len: 2 })));
    }

    #[test]
    fn test_numeric_only() {
        let numeric = rock().numeric_only();
        assert_eq!(numeric.column_names(), vec!["release_year"]);
        assert!(NumericTable::try_from(rock()).is_err());
    }

    #[test]
    fn test_drop_and_select() {
        let table = rock();
        let dropped = table.drop_columns(&["artist_clean"]).unwrap();
        assert_eq!(dropped.column_names(), vec!["song_clean", "release_year"]);
        assert!(table.drop_columns(&["nope"]).is_err());

        let selected = table.select(&["release_year", "song_clean"]).unwrap();
        assert_eq!(selected.column_names(), vec!["release_year", "song_clean"]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::empty();
        assert_eq!(table.shape(), (0, 0));
        assert!(table.is_empty());
        assert_eq!(table.numeric_only().column_count(), 0);
    }
}
