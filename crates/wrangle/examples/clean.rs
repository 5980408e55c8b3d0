//! Example: clean a classic-rock song list and inspect a few rows.
//!
//! Usage:
//!   cargo run --example clean -- <file_path> [row ...]
//!
//! Example:
//!   cargo run --example clean -- classic-rock-song-list.csv 0 10 42

use std::env;
use std::path::Path;

use wrangle::pipeline::PipelineConfig;
use wrangle::{Wrangler, WranglerConfig};

fn main() -> wrangle::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example clean -- <file_path> [row ...]");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let wrangler = Wrangler::with_config(WranglerConfig {
        pipeline: PipelineConfig::rock_songs(),
        ..WranglerConfig::default()
    });
    let result = wrangler.process(path)?;

    let separator = "=".repeat(60);
    println!("{}", separator);
    println!("{}: {} rows", result.source.file, result.table.row_count());
    println!("{}", separator);
    println!();

    println!("Missing per column:");
    for (column, count) in &result.null_counts {
        println!("  {:<20} {}", column, count);
    }
    println!();

    println!("{}", result.summary);

    for arg in &args[2..] {
        let Ok(index) = arg.parse::<usize>() else {
            eprintln!("Skipping '{}': not a row number", arg);
            continue;
        };
        println!("{}", wrangler.inspect(&result.table, index)?);
    }

    Ok(())
}
