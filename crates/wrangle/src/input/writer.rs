//! Delimited output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{Result, WrangleError};
use crate::table::Table;

/// Write a table as comma-separated text with a header row.
///
/// Missing cells are written as empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    write_delimited(table, writer, b',')
}

/// Write a table with an explicit delimiter.
pub fn write_delimited<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(table.column_names())?;
    for row in table.rows() {
        out.write_record(row.iter().map(|(_, value)| value.to_field()))?;
    }

    out.flush().map_err(|e| WrangleError::Csv(e.into()))?;
    Ok(())
}

/// Write a table to a file, choosing tabs for `.tsv` paths.
pub fn write_csv_file(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WrangleError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };
    write_delimited(table, file, delimiter)?;

    info!(
        path = %path.display(),
        rows = table.row_count(),
        "wrote table"
    );
    Ok(())
}

/// Parse a user-supplied delimiter: a single character or `tab`.
pub fn parse_delimiter(text: &str) -> Result<u8> {
    match text {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(WrangleError::InvalidDelimiter(format!(
            "expected a single ASCII character or 'tab', got '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Value};

    #[test]
    fn test_missing_written_as_empty() {
        let table = Table::new(vec![
            Column::from_strs("song", &["Fantasy Girl", "Hold On Loosely"]),
            Column::new("release_year", vec![Value::Missing, Value::Float(1981.0)]),
        ])
        .unwrap();

        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "song,release_year\nFantasy Girl,\nHold On Loosely,1981.0\n"
        );
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(matches!(
            parse_delimiter(";;"),
            Err(WrangleError::InvalidDelimiter(_))
        ));
    }
}
