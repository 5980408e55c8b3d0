//! Wrangle CLI - clean, summarize and inspect tabular data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Clean {
            file,
            output,
            source,
            report,
            json,
        } => commands::clean::run(file, output, source, report, json, cli.verbose),

        Commands::Describe {
            file,
            source,
            strict,
            json,
        } => commands::describe::run(file, source, strict, json, cli.verbose),

        Commands::Inspect {
            file,
            rows,
            all,
            columns,
            source,
            json,
        } => commands::inspect::run(file, rows, all, columns, source, json, cli.verbose),

        Commands::Profile {
            file,
            column,
            bins,
            labels,
            quantiles,
            source,
            json,
        } => commands::profile::run(
            file,
            column,
            bins,
            labels,
            quantiles,
            source,
            json,
            cli.verbose,
        ),

        Commands::Regress {
            file,
            x,
            y,
            test_size,
            seed,
            source,
            json,
        } => commands::regress::run(file, x, y, test_size, seed, source, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
