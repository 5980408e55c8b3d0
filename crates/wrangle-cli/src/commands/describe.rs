//! Describe command - summarize the numeric columns.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::profile::overall_range;
use wrangle::{describe, NumericTable};

use super::{build_wrangler, heading, require_file};
use crate::cli::SourceArgs;

pub fn run(
    file: PathBuf,
    source: SourceArgs,
    strict: bool,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let wrangler = build_wrangler(&source)?;

    let (table, metadata) = wrangler.load(&file)?;
    let (table, _) = wrangler.clean(table)?;

    let numeric = if strict {
        NumericTable::try_from(table.clone())?
    } else {
        table.numeric_only()
    };
    let summary = describe(&numeric);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {} ({} of {} columns numeric)",
        "Summary of".cyan().bold(),
        metadata.file.white(),
        summary.len(),
        table.column_count()
    );
    println!();

    if summary.is_empty() {
        println!("{}", "No numeric columns.".dimmed());
        return Ok(());
    }

    print!("{}", summary);
    println!();

    if let Some((lo, hi)) = overall_range(&numeric) {
        heading("Overall range:");
        println!("  {} to {}", lo, hi);
    }

    let skipped: Vec<&str> = table
        .columns()
        .iter()
        .filter(|c| !c.kind().is_summarizable())
        .map(|c| c.name())
        .collect();
    if !skipped.is_empty() {
        println!();
        println!("{} {}", "Skipped:".dimmed(), skipped.join(", ").dimmed());
    }

    Ok(())
}
