//! Main Wrangler struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::inspect::{inspect_song, InspectConfig, SongFacts};
use crate::pipeline::{CleaningPipeline, CleaningReport, PipelineConfig};
use crate::profile::{describe, null_counts, Summary};
use crate::table::{NumericTable, Table};

/// Configuration for a load, clean and summarize run.
#[derive(Debug, Clone)]
pub struct WranglerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Cleaning steps to run after loading.
    pub pipeline: PipelineConfig,
    /// Summarize only the numeric columns. When false, any non-numeric
    /// column left after cleaning makes summarizing fail.
    pub describe_numeric_only: bool,
    /// Column names and threshold for row inspection.
    pub inspect: InspectConfig,
}

impl Default for WranglerConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            pipeline: PipelineConfig::default(),
            describe_numeric_only: true,
            inspect: InspectConfig::default(),
        }
    }
}

/// Result of processing a data file.
#[derive(Debug, Clone, Serialize)]
pub struct WrangleResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The cleaned table.
    pub table: Table,
    /// What the pipeline changed.
    pub report: CleaningReport,
    /// Summary of the cleaned numeric columns.
    pub summary: Summary,
    /// Missing cells per column after cleaning.
    pub null_counts: IndexMap<String, usize>,
}

/// Loads, cleans and summarizes tabular data.
pub struct Wrangler {
    config: WranglerConfig,
    parser: Parser,
    pipeline: CleaningPipeline,
}

impl Wrangler {
    /// Create a new Wrangler with default configuration.
    pub fn new() -> Self {
        Self::with_config(WranglerConfig::default())
    }

    /// Create a Wrangler with custom configuration.
    pub fn with_config(config: WranglerConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let pipeline = CleaningPipeline::from_config(&config.pipeline);

        Self {
            config,
            parser,
            pipeline,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &WranglerConfig {
        &self.config
    }

    /// Load a file without cleaning it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Run the configured pipeline.
    pub fn clean(&self, table: Table) -> Result<(Table, CleaningReport)> {
        self.pipeline.run(table)
    }

    /// Summarize a table according to `describe_numeric_only`.
    pub fn summarize(&self, table: &Table) -> Result<Summary> {
        let numeric = if self.config.describe_numeric_only {
            table.numeric_only()
        } else {
            NumericTable::try_from(table.clone())?
        };
        Ok(describe(&numeric))
    }

    /// Inspect one row with the configured columns and threshold.
    pub fn inspect(&self, table: &Table, index: usize) -> Result<SongFacts> {
        inspect_song(table, index, &self.config.inspect)
    }

    /// Load, clean and summarize a file.
    pub fn process(&self, path: impl AsRef<Path>) -> Result<WrangleResult> {
        let (table, source) = self.load(path)?;
        let (table, report) = self.clean(table)?;
        let summary = self.summarize(&table)?;
        let null_counts = null_counts(&table);

        info!(
            file = %source.file,
            rows = table.row_count(),
            summarized = summary.len(),
            "processed file"
        );

        Ok(WrangleResult {
            source,
            table,
            report,
            summary,
            null_counts,
        })
    }
}

impl Default for Wrangler {
    fn default() -> Self {
        Self::new()
    }
}
