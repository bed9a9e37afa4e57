//! Pipeline configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DaylogError, Result};
use crate::input::ParserConfig;
use crate::output::WriterConfig;
use crate::transform::TransformConfig;

/// Everything a pipeline run needs, injected by the caller.
///
/// ```
/// use daylog::PipelineConfig;
///
/// let config = PipelineConfig::new("raw/daily_calendar.csv", "processed");
/// assert_eq!(config.transform.learning_separator, ", ");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source CSV location.
    pub input_path: PathBuf,
    /// Destination directory for the two output tables.
    pub output_dir: PathBuf,
    /// Loader configuration.
    pub parser: ParserConfig,
    /// Transformer configuration.
    pub transform: TransformConfig,
    /// Writer configuration.
    pub writer: WriterConfig,
}

impl PipelineConfig {
    /// Create a configuration with default stage settings.
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| DaylogError::io(path, e))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Check that the input path is set.
    pub fn validate_input(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(DaylogError::Config("input_path is not set".to_string()));
        }
        Ok(())
    }

    /// Check that both paths are set.
    pub fn validate(&self) -> Result<()> {
        self.validate_input()?;
        if self.output_dir.as_os_str().is_empty() {
            return Err(DaylogError::Config("output_dir is not set".to_string()));
        }
        Ok(())
    }
}
