//! Wrangle: column cleaning, type coercion and summaries for tabular data.
//!
//! A loaded table goes through a small set of pure stages, each taking a
//! value and returning a new one:
//!
//! - **Name normalization**: lowercase, spaces to underscores, `*` and `?`
//!   removed.
//! - **Null and sentinel repair**: mask the cells to repair, then mark them
//!   missing or fill them.
//! - **Coercion**: convert to numbers or dates; anything that does not parse
//!   becomes missing.
//! - **Summary**: min, max and friends over the numeric columns, skipping
//!   missing cells.
//! - **Row inspection**: title, artist and a three-valued "released before"
//!   check for one row.
//!
//! # Example
//!
//! ```no_run
//! use wrangle::pipeline::PipelineConfig;
//! use wrangle::{Wrangler, WranglerConfig};
//!
//! let config = WranglerConfig {
//!     pipeline: PipelineConfig::rock_songs(),
//!     ..WranglerConfig::default()
//! };
//! let result = Wrangler::with_config(config).process("classic-rock.csv").unwrap();
//!
//! println!("{}", result.summary);
//! println!("Cells changed: {}", result.report.cells_changed);
//! ```

pub mod clean;
pub mod error;
pub mod input;
pub mod inspect;
pub mod pipeline;
pub mod profile;
pub mod regression;
pub mod table;

mod wrangle;

pub use crate::wrangle::{WrangleResult, Wrangler, WranglerConfig};
pub use error::{Result, WrangleError};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use inspect::{inspect_song, InspectConfig, ReleaseCheck, SongFacts};
pub use profile::{describe, Stats, Summary};
pub use table::{Column, ColumnKind, NumericTable, Table, Value};
