//! Clean command - run a pipeline and write the cleaned table.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::input::write_csv_file;

use super::{build_wrangler, heading, require_file};
use crate::cli::SourceArgs;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    source: SourceArgs,
    report_path: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let wrangler = build_wrangler(&source)?;

    let (table, metadata) = wrangler.load(&file)?;
    let (table, report) = wrangler.clean(table)?;

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.clean.csv", stem));
        p
    });
    write_csv_file(&table, &output_path)?;

    if let Some(path) = &report_path {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Cleaned".green().bold(),
        metadata.file.white(),
        table.row_count(),
        table.column_count()
    );
    println!();

    heading("Steps:");
    for step in wrangler.config().pipeline.steps.iter() {
        println!("  {} {}", "•".cyan(), step.description());
    }
    if wrangler.config().pipeline.steps.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    println!();

    heading("Changes:");
    for change in &report.changes {
        println!(
            "  {:<24} {} ({} cells)",
            change.column.white(),
            change.description,
            change.values_changed
        );
        if verbose {
            for audit in &change.row_audits {
                println!(
                    "      row {}: {} → {}",
                    audit.row,
                    audit.original_value.red(),
                    audit.new_value.green()
                );
            }
        }
    }
    println!(
        "  {} cells changed in {} steps",
        report.cells_changed.to_string().white().bold(),
        report.steps_applied
    );
    println!();

    println!("Wrote {}", output_path.display().to_string().cyan());
    if let Some(path) = report_path {
        println!("Report {}", path.display().to_string().cyan());
    }

    Ok(())
}
