//! Row inspection for the songs catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WrangleError};
use crate::table::{Table, Value};

/// Which columns to read and which year to compare against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    pub song_column: String,
    pub artist_column: String,
    pub year_column: String,
    /// Releases strictly before this year count as "before".
    pub threshold: i64,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            song_column: "song_clean".to_string(),
            artist_column: "artist_clean".to_string(),
            year_column: "release_year".to_string(),
            threshold: 1970,
        }
    }
}

/// Outcome of comparing a release year against the threshold.
///
/// A missing year is `Unknown`, never `NotBefore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseCheck {
    Before,
    NotBefore,
    Unknown,
}

impl ReleaseCheck {
    /// Compare a year cell against `threshold`.
    pub fn evaluate(year: &Value, threshold: i64) -> Self {
        match year.as_f64() {
            Some(y) if !y.is_finite() => ReleaseCheck::Unknown,
            Some(y) if y < threshold as f64 => ReleaseCheck::Before,
            Some(_) => ReleaseCheck::NotBefore,
            None => ReleaseCheck::Unknown,
        }
    }

    /// `Some(true)`/`Some(false)` when known.
    pub fn known(&self) -> Option<bool> {
        match self {
            ReleaseCheck::Before => Some(true),
            ReleaseCheck::NotBefore => Some(false),
            ReleaseCheck::Unknown => None,
        }
    }
}

impl fmt::Display for ReleaseCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseCheck::Before => f.write_str("true"),
            ReleaseCheck::NotBefore => f.write_str("false"),
            ReleaseCheck::Unknown => f.write_str("unknown"),
        }
    }
}

/// Facts derived from one row.
#[derive(Debug, Clone, Serialize)]
pub struct SongFacts {
    pub row: usize,
    pub song: Value,
    pub artist: Value,
    pub threshold: i64,
    pub released_before: ReleaseCheck,
}

impl fmt::Display for SongFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Song: {}", self.song)?;
        writeln!(f, "Artist: {}", self.artist)?;
        writeln!(
            f,
            "Released before {}: {}",
            self.threshold, self.released_before
        )
    }
}

/// Read the song, artist and release check of row `index`.
///
/// The year column must already be numeric (or entirely missing).
pub fn inspect_song(table: &Table, index: usize, config: &InspectConfig) -> Result<SongFacts> {
    let years = table.require_column(&config.year_column)?;
    if !years.kind().is_summarizable() {
        return Err(WrangleError::NotNumeric {
            column: years.name().to_string(),
            kind: years.kind(),
        });
    }

    let row = table.row(index)?;
    let song = row.require(&config.song_column)?.clone();
    let artist = row.require(&config.artist_column)?.clone();
    let year = row.require(&config.year_column)?;

    Ok(SongFacts {
        row: index,
        song,
        artist,
        threshold: config.threshold,
        released_before: ReleaseCheck::evaluate(year, config.threshold),
    })
}

/// Inspect every row.
pub fn inspect_all(table: &Table, config: &InspectConfig) -> Result<Vec<SongFacts>> {
    (0..table.row_count())
        .map(|i| inspect_song(table, i, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::coerce_numeric;
    use crate::table::Column;

    fn songs() -> Table {
        Table::new(vec![
            Column::from_strs("song_clean", &["X", "Fantasy Girl"]),
            Column::from_strs("artist_clean", &["Y", ".38 Special"]),
            Column::new("release_year", vec![Value::Integer(1965), Value::Missing]),
        ])
        .unwrap()
    }

    #[test]
    fn test_before_threshold() {
        let facts = inspect_song(&songs(), 0, &InspectConfig::default()).unwrap();
        assert_eq!(facts.song.as_str(), Some("X"));
        assert_eq!(facts.artist.as_str(), Some("Y"));
        assert_eq!(facts.released_before, ReleaseCheck::Before);
    }

    #[test]
    fn test_missing_year_is_unknown() {
        let facts = inspect_song(&songs(), 1, &InspectConfig::default()).unwrap();
        assert_eq!(facts.released_before, ReleaseCheck::Unknown);
        assert_eq!(facts.released_before.known(), None);
        assert!(facts.to_string().contains("Released before 1970: unknown"));
    }

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(ReleaseCheck::evaluate(&Value::Float(1970.0), 1970), ReleaseCheck::NotBefore);
        assert_eq!(ReleaseCheck::evaluate(&Value::Float(1969.5), 1970), ReleaseCheck::Before);
    }

    #[test]
    fn test_nan_year_is_unknown() {
        assert_eq!(ReleaseCheck::evaluate(&Value::Float(f64::NAN), 1970), ReleaseCheck::Unknown);
        assert_eq!(
            ReleaseCheck::evaluate(&Value::Float(f64::NEG_INFINITY), 1970),
            ReleaseCheck::Unknown
        );

        let table = Table::new(vec![
            Column::from_strs("song_clean", &["X", "Fantasy Girl", "Z"]),
            Column::from_strs("artist_clean", &["Y", ".38 Special", "W"]),
            coerce_numeric(&Column::new(
                "release_year",
                vec![Value::Integer(1965), Value::Float(f64::NAN), Value::Integer(1971)],
            )),
        ])
        .unwrap();
        let facts = inspect_song(&table, 1, &InspectConfig::default()).unwrap();
        assert_eq!(facts.released_before, ReleaseCheck::Unknown);
    }

    #[test]
    fn test_out_of_bounds() {
        let err = inspect_song(&songs(), 5, &InspectConfig::default()).unwrap_err();
        assert!(matches!(err, WrangleError::RowOutOfBounds { index: 5, len: 2 }));
    }

    #[test]
    fn test_uncoerced_year_rejected() {
        let table = Table::new(vec![
            Column::from_strs("song_clean", &["X"]),
            Column::from_strs("artist_clean", &["Y"]),
            Column::from_strs("release_year", &["1965"]),
        ])
        .unwrap();
        let err = inspect_song(&table, 0, &InspectConfig::default()).unwrap_err();
        assert!(matches!(err, WrangleError::NotNumeric { .. }));
    }

    #[test]
    fn test_inspect_all() {
        let facts = inspect_all(&songs(), &InspectConfig::default()).unwrap();
        assert_eq!(facts.len(), 2);
    }
}
