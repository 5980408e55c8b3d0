//! CSV/TSV loader with delimiter detection and type inference.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{format_name, SourceMetadata};
use crate::clean::{coerce_date, infer_column};
use crate::error::{Result, WrangleError};
use crate::table::{Column, Table, Value};

/// Delimiters to try when auto-detecting, in order of preference on ties.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Records sampled when auto-detecting the delimiter.
const DETECT_SAMPLE_RECORDS: usize = 10;

/// Cell texts read as missing by default.
const DEFAULT_NA_VALUES: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Cell texts (after trimming) that load as missing.
    pub na_values: Vec<String>,
    /// Turn text columns whose every cell is a number into numeric columns.
    pub infer_types: bool,
    /// Columns to parse as dates.
    pub parse_dates: Vec<String>,
    /// chrono format for `parse_dates` (None = try common formats).
    pub date_format: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            infer_types: true,
            parse_dates: Vec::new(),
            date_format: None,
        }
    }
}

/// Loads delimited files into tables.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| WrangleError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_name(delimiter).to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source))
    }

    /// Parse in-memory text.
    pub fn parse_str(&self, text: &str) -> Result<Table> {
        let bytes = text.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(bytes)?,
        };
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse bytes with a known delimiter.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            records.push(result?);
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            match records.first() {
                Some(record) => (0..record.len())
                    .map(|i| format!("column_{}", i + 1))
                    .collect(),
                None => return Err(WrangleError::EmptyData("No data rows found".to_string())),
            }
        };

        if headers.is_empty() {
            return Err(WrangleError::EmptyData("No columns found".to_string()));
        }

        // Short rows are padded with missing cells, long rows truncated.
        let mut cells: Vec<Vec<Value>> = vec![Vec::with_capacity(records.len()); headers.len()];
        for record in &records {
            for (col_idx, column) in cells.iter_mut().enumerate() {
                let value = record
                    .get(col_idx)
                    .map(|raw| self.read_cell(raw))
                    .unwrap_or(Value::Missing);
                column.push(value);
            }
        }

        let mut columns = Vec::with_capacity(headers.len());
        for (name, values) in headers.into_iter().zip(cells) {
            let mut column = Column::new(name, values);
            if self.config.infer_types {
                column = infer_column(&column);
            }
            debug!(column = column.name(), kind = %column.kind(), "loaded column");
            columns.push(column);
        }

        let mut table = Table::new(columns)?;
        for name in &self.config.parse_dates {
            let column = table.require_column(name)?;
            let dates = coerce_date(column, self.config.date_format.as_deref());
            table = table.with_column(dates)?;
        }

        Ok(table)
    }

    /// Pick the candidate that splits the sampled records into the same
    /// number of fields, preferring wider splits. Quoted fields are honoured.
    /// Falls back to a comma when nothing splits the header.
    fn detect_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(WrangleError::EmptyData("No lines to analyze".to_string()));
        }

        let mut best = (b',', (false, 0));
        for &delimiter in DELIMITERS {
            let widths = sample_widths(bytes, delimiter, self.config.quote);
            let header_width = widths.first().copied().unwrap_or(0);
            if header_width < 2 {
                continue;
            }
            let consistent = widths.iter().all(|&w| w == header_width);
            let score = (consistent, header_width);
            if score > best.1 {
                best = (delimiter, score);
            }
        }

        debug!(delimiter = %(best.0 as char).escape_default(), "detected delimiter");
        Ok(best.0)
    }

    fn read_cell(&self, raw: &str) -> Value {
        let trimmed = raw.trim();
        if self.config.na_values.iter().any(|na| na == trimmed) {
            Value::Missing
        } else {
            Value::Text(raw.to_string())
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Field counts of the first records when split on `delimiter`.
fn sample_widths(bytes: &[u8], delimiter: u8, quote: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(quote)
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes)
        .records()
        .take(DETECT_SAMPLE_RECORDS)
        .filter_map(|record| record.ok())
        .map(|record| record.len())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnKind;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_ignores_quoted_delimiters() {
        let data = b"song\tnote\n\"Caught Up, In You\"\tx\n\"a,b,c\"\ty\n";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_prefers_consistent_split() {
        let data = b"price;qty\n1,5;2\n3,25;4\n";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_single_column_defaults_to_comma() {
        assert_eq!(Parser::new().detect_delimiter(b"n\n1\n2\n").unwrap(), b',');
    }

    #[test]
    fn test_parse_rock_csv() {
        let parser = Parser::new();
        let data = "Song Clean,ARTIST CLEAN,Release Year,COMBINED,First?,Year?,PlayCount,F*G\n\
                    Caught Up in You,.38 Special,1982,Caught Up in You by .38 Special,1,1,82,82\n\
                    Fantasy Girl,.38 Special,,Fantasy Girl by .38 Special,1,0,3,0\n\
                    Hold On Loosely,.38 Special,SONGFACTS.COM,Hold On Loosely by .38 Special,1,1,85,85\n";
        let table = parser.parse_str(data).unwrap();

        assert_eq!(table.shape(), (3, 8));
        let years = table.column("Release Year").unwrap();
        assert_eq!(years.kind(), ColumnKind::String);
        assert!(years.values()[1].is_missing());
        assert_eq!(table.column("PlayCount").unwrap().kind(), ColumnKind::Integer);
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = Parser::new().parse_str("a,b\n").unwrap();
        assert_eq!(table.shape(), (0, 2));
    }

    #[test]
    fn test_ragged_rows_padded() {
        let table = Parser::new().parse_str("a,b,c\n1,2\n3,4,5,6\n").unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert!(table.column("c").unwrap().values()[0].is_missing());
    }

    #[test]
    fn test_parse_dates() {
        let config = ParserConfig {
            parse_dates: vec!["Date".to_string()],
            ..ParserConfig::default()
        };
        let table = Parser::with_config(config)
            .parse_str("Date,Magnitude\n01/02/1965,6.0\n1975-02-23T02:58:41.000Z,5.8\n")
            .unwrap();
        assert_eq!(table.column("Date").unwrap().kind(), ColumnKind::Date);
        assert_eq!(table.column("Magnitude").unwrap().kind(), ColumnKind::Float);
    }

    #[test]
    fn test_without_inference() {
        let config = ParserConfig {
            infer_types: false,
            ..ParserConfig::default()
        };
        let table = Parser::with_config(config).parse_str("n\n1\n2\n").unwrap();
        assert_eq!(table.column("n").unwrap().kind(), ColumnKind::String);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            Parser::new().parse_str(""),
            Err(WrangleError::EmptyData(_))
        ));
    }
}
