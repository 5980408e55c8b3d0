//! Profile command - missing counts, value counts, quantiles and bins.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::profile::{cut, null_counts, quantiles, total_nulls, value_counts};

use super::{build_wrangler, heading, require_file};
use crate::cli::SourceArgs;

/// Distinct values shown in human-readable output.
const TOP_VALUES: usize = 10;

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    column: Option<String>,
    bins: Option<usize>,
    labels: Vec<String>,
    qs: Vec<f64>,
    source: SourceArgs,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let wrangler = build_wrangler(&source)?;

    let (table, metadata) = wrangler.load(&file)?;
    let (table, _) = wrangler.clean(table)?;
    let nulls = null_counts(&table);

    let Some(name) = column else {
        if json_output {
            let profile = serde_json::json!({
                "file": metadata.file,
                "shape": table.shape(),
                "kinds": table.kinds().into_iter().map(|(n, k)| (n, k.to_string())).collect::<Vec<_>>(),
                "null_counts": nulls,
                "total_nulls": total_nulls(&table),
            });
            println!("{}", serde_json::to_string_pretty(&profile)?);
            return Ok(());
        }

        let (rows, cols) = table.shape();
        println!(
            "{} {} ({} rows, {} columns)",
            "Profile of".cyan().bold(),
            metadata.file.white(),
            rows,
            cols
        );
        println!();
        heading("Columns:");
        for (name, kind) in table.kinds() {
            let missing = nulls.get(name).copied().unwrap_or(0);
            let missing_text = if missing > 0 {
                missing.to_string().red()
            } else {
                missing.to_string().green()
            };
            println!("  {:<24} {:<8} missing {}", name, kind.to_string(), missing_text);
        }
        println!();
        println!("Total missing: {}", total_nulls(&table).to_string().white().bold());
        return Ok(());
    };

    let target = table.require_column(&name)?;
    let counts = value_counts(target);
    let quantile_values = if target.kind().is_summarizable() {
        Some(quantiles(target, &qs)?)
    } else {
        None
    };
    let binned = match bins {
        Some(n) if labels.is_empty() => Some(cut::<String>(target, n, None)?),
        Some(n) => Some(cut(target, n, Some(&labels[..]))?),
        None => None,
    };
    let bin_counts = binned.as_ref().map(value_counts);

    if json_output {
        let profile = serde_json::json!({
            "column": name,
            "kind": target.kind(),
            "missing": target.missing_count(),
            "value_counts": counts,
            "quantiles": quantile_values.as_ref().map(|v| qs.iter().zip(v).collect::<Vec<_>>()),
            "bins": bin_counts,
        });
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!(
        "{} '{}' ({}, {} missing)",
        "Column".cyan().bold(),
        name.white(),
        target.kind(),
        target.missing_count()
    );
    println!();

    heading("Most common values:");
    for (value, count) in counts.iter().take(TOP_VALUES) {
        println!("  {:<24} {}", value, count);
    }
    if counts.len() > TOP_VALUES {
        println!("  {}", format!("... {} more", counts.len() - TOP_VALUES).dimmed());
    }

    if let Some(values) = &quantile_values {
        println!();
        heading("Quantiles:");
        for (q, v) in qs.iter().zip(values) {
            let shown = v.map(|x| format!("{:.3}", x)).unwrap_or_else(|| "-".to_string());
            println!("  {:<6} {}", q, shown);
        }
    }

    if let Some(counts) = &bin_counts {
        println!();
        heading("Bins:");
        for (label, count) in counts {
            println!("  {:<24} {}", label, count);
        }
    }

    Ok(())
}
