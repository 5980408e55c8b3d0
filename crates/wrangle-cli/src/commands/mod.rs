//! CLI command implementations.

pub mod clean;
pub mod describe;
pub mod inspect;
pub mod profile;
pub mod regress;

use std::path::Path;

use colored::Colorize;
use wrangle::input::parse_delimiter;
use wrangle::pipeline::PipelineConfig;
use wrangle::{ParserConfig, Wrangler, WranglerConfig};

use crate::cli::{Preset, SourceArgs};

/// Build a Wrangler from the shared loading flags.
pub(crate) fn build_wrangler(
    source: &SourceArgs,
) -> Result<Wrangler, Box<dyn std::error::Error>> {
    let delimiter = source
        .delimiter
        .as_deref()
        .map(parse_delimiter)
        .transpose()?;

    let pipeline = match (&source.pipeline, &source.preset) {
        (Some(path), _) => PipelineConfig::load(path)?,
        (None, Preset::RockSongs) => PipelineConfig::rock_songs(),
        (None, Preset::None) => PipelineConfig::default(),
    };

    Ok(Wrangler::with_config(WranglerConfig {
        parser: ParserConfig {
            delimiter,
            parse_dates: source.parse_dates.clone(),
            ..ParserConfig::default()
        },
        pipeline,
        ..WranglerConfig::default()
    }))
}

/// Fail early with a readable message when the input is missing.
pub(crate) fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Data file not found: {}", file.display()).into());
    }
    Ok(())
}

/// Print a section heading.
pub(crate) fn heading(text: &str) {
    println!("{}", text.yellow().bold());
}
