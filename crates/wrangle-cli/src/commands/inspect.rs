//! Inspect command - song, artist and release check for rows.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::inspect::inspect_all;
use wrangle::{inspect_song, InspectConfig, ReleaseCheck, SongFacts};

use super::{build_wrangler, require_file};
use crate::cli::{InspectArgs, SourceArgs};

pub fn run(
    file: PathBuf,
    rows: Vec<usize>,
    all: bool,
    columns: InspectArgs,
    source: SourceArgs,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&file)?;
    let wrangler = build_wrangler(&source)?;

    let (table, _) = wrangler.load(&file)?;
    let (table, _) = wrangler.clean(table)?;

    let config = InspectConfig {
        song_column: columns.song_column,
        artist_column: columns.artist_column,
        year_column: columns.year_column,
        threshold: columns.threshold,
    };

    let facts = if all {
        inspect_all(&table, &config)?
    } else {
        rows.into_iter()
            .map(|i| inspect_song(&table, i, &config))
            .collect::<wrangle::Result<Vec<SongFacts>>>()?
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&facts)?);
        return Ok(());
    }

    for fact in &facts {
        let check = match fact.released_before {
            ReleaseCheck::Before => fact.released_before.to_string().green(),
            ReleaseCheck::NotBefore => fact.released_before.to_string().normal(),
            ReleaseCheck::Unknown => fact.released_before.to_string().yellow(),
        };
        println!("{} {}", "Row".dimmed(), fact.row.to_string().dimmed());
        println!("Song: {}", fact.song.to_string().white().bold());
        println!("Artist: {}", fact.artist);
        println!("Released before {}: {}", fact.threshold, check);
        println!();
    }

    Ok(())
}
