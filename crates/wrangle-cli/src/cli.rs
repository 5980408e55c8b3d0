//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Wrangle: column cleaning, type coercion and summaries for tabular data
#[derive(Parser)]
#[command(name = "wrangle")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a cleaning pipeline and write the cleaned table
    Clean {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for cleaned data (default: <file>.clean.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Write the cleaning report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Print the report as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Summarize numeric columns (min, max, mean, quartiles)
    Describe {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Fail if any column is not numeric instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show song, artist and release check for rows
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row positions to inspect (0-based, comma-separated)
        #[arg(short, long, value_delimiter = ',', default_value = "0")]
        rows: Vec<usize>,

        /// Inspect every row
        #[arg(long, conflicts_with = "rows")]
        all: bool,

        #[command(flatten)]
        columns: InspectArgs,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Missing counts, value counts, quantiles and binning
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to profile in detail
        #[arg(short, long)]
        column: Option<String>,

        /// Number of equal-width bins for --column
        #[arg(long)]
        bins: Option<usize>,

        /// Bin labels (comma-separated, one per bin)
        #[arg(long, value_delimiter = ',', requires = "bins")]
        labels: Vec<String>,

        /// Quantiles to compute for --column (comma-separated)
        #[arg(short, long, value_delimiter = ',', default_value = "0.25,0.5,0.75")]
        quantiles: Vec<f64>,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fit a one-feature linear regression with a train/test split
    Regress {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Feature column
        #[arg(short, long)]
        x: String,

        /// Target column
        #[arg(short, long)]
        y: String,

        /// Fraction of rows held out for testing
        #[arg(long, default_value = "0.3333333333333333")]
        test_size: f64,

        /// Seed for the shuffle
        #[arg(long, default_value = "0")]
        seed: u64,

        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// How to load and clean the input before the command runs.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Field delimiter (single character or "tab"; default: auto-detect)
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Pipeline JSON file with cleaning steps
    #[arg(short, long, conflicts_with = "preset")]
    pub pipeline: Option<PathBuf>,

    /// Built-in pipeline
    #[arg(long, default_value = "none")]
    pub preset: Preset,

    /// Columns to parse as dates (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub parse_dates: Vec<String>,
}

/// Columns and threshold used by `inspect`.
#[derive(Args, Clone, Debug)]
pub struct InspectArgs {
    /// Song title column
    #[arg(long, default_value = "song_clean")]
    pub song_column: String,

    /// Artist column
    #[arg(long, default_value = "artist_clean")]
    pub artist_column: String,

    /// Release year column
    #[arg(long, default_value = "release_year")]
    pub year_column: String,

    /// Releases before this year count as "before"
    #[arg(short, long, default_value = "1970")]
    pub threshold: i64,
}

/// Built-in cleaning pipelines.
#[derive(Clone, Debug, Default)]
pub enum Preset {
    /// No cleaning
    #[default]
    None,
    /// Normalize names, treat SONGFACTS.COM as missing, coerce release_year
    RockSongs,
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "none" => Ok(Preset::None),
            "rock-songs" | "rock" => Ok(Preset::RockSongs),
            _ => Err(format!("Unknown preset: {}. Use none or rock-songs.", s)),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::None => write!(f, "none"),
            Preset::RockSongs => write!(f, "rock-songs"),
        }
    }
}
