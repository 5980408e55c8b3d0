//! Reading and writing delimited files.

mod parser;
mod source;
mod writer;

pub use parser::{Parser, ParserConfig};
pub use source::SourceMetadata;
pub use writer::{parse_delimiter, write_csv, write_csv_file, write_delimited};
