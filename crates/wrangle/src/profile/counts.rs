//! Null and value counts.

use indexmap::IndexMap;

use crate::table::{Column, Table};

/// Missing cells per column, in column order.
pub fn null_counts(table: &Table) -> IndexMap<String, usize> {
    table
        .columns()
        .iter()
        .map(|c| (c.name().to_string(), c.missing_count()))
        .collect()
}

/// Total missing cells in the table.
pub fn total_nulls(table: &Table) -> usize {
    table.columns().iter().map(Column::missing_count).sum()
}

/// Frequency of each distinct non-missing value, most frequent first.
///
/// Ties keep the order in which values were first seen.
pub fn value_counts(column: &Column) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in column.iter().filter(|v| !v.is_missing()) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    #[test]
    fn test_null_counts() {
        let table = Table::new(vec![
            Column::new("season", vec![Value::Integer(1), Value::Integer(2)]),
            Column::new("atemp", vec![Value::Missing, Value::Float(0.3)]),
        ])
        .unwrap();

        let counts = null_counts(&table);
        assert_eq!(counts.get("season"), Some(&0));
        assert_eq!(counts.get("atemp"), Some(&1));
        assert_eq!(counts.keys().collect::<Vec<_>>(), vec!["season", "atemp"]);
        assert_eq!(total_nulls(&table), 1);
    }

    #[test]
    fn test_value_counts_order() {
        let col = Column::new(
            "season",
            vec![
                Value::Integer(3),
                Value::Integer(1),
                Value::Integer(1),
                Value::Missing,
                Value::Integer(2),
            ],
        );
        let counts = value_counts(&col);
        let ordered: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(ordered, vec![("1", 2), ("3", 1), ("2", 1)]);
    }
}
