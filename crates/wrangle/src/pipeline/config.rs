//! Pipeline configuration and JSON persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::operations::CleaningStep;
use crate::error::{Result, WrangleError};

/// An ordered list of cleaning steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub steps: Vec<CleaningStep>,
}

impl PipelineConfig {
    /// Create a config from steps.
    pub fn new(steps: Vec<CleaningStep>) -> Self {
        Self { steps }
    }

    /// The classic-rock song list cleanup: normalize names, treat the
    /// `SONGFACTS.COM` placeholder in `release_year` as missing, then make
    /// the year numeric.
    pub fn rock_songs() -> Self {
        Self::new(vec![
            CleaningStep::NormalizeNames,
            CleaningStep::MarkMissing {
                column: "release_year".to_string(),
                values: vec!["SONGFACTS.COM".to_string()],
                pattern: None,
            },
            CleaningStep::CoerceNumeric {
                column: Some("release_year".to_string()),
            },
        ])
    }

    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Save the config to a JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use wrangle::pipeline::PipelineConfig;
    /// PipelineConfig::rock_songs().save("rock.pipeline.json")?;
    /// # Ok::<(), wrangle::WrangleError>(())
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| WrangleError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = File::create(path).map_err(io_err)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| WrangleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: PipelineConfig = serde_json::from_reader(BufReader::new(file))?;
        if config.steps.is_empty() {
            return Err(WrangleError::Config(format!(
                "pipeline '{}' has no steps",
                path.display()
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("rock.json");

        PipelineConfig::rock_songs().save(&path).unwrap();
        let loaded = PipelineConfig::load(&path).unwrap();

        assert_eq!(loaded.steps.len(), 3);
        assert!(matches!(loaded.steps[0], CleaningStep::NormalizeNames));
    }

    #[test]
    fn test_load_rejects_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, r#"{"steps": []}"#).unwrap();

        assert!(matches!(
            PipelineConfig::load(&path),
            Err(WrangleError::Config(_))
        ));
    }

    #[test]
    fn test_from_json_unknown_op() {
        assert!(matches!(
            PipelineConfig::from_json(r#"{"steps": [{"op": "explode"}]}"#),
            Err(WrangleError::Json(_))
        ));
    }
}
