//! CLI command implementations.

pub mod check;
pub mod run;

use std::path::PathBuf;

use daylog::PipelineConfig;

use crate::cli::PipelineOptions;

/// Merge the optional config file with command-line overrides.
pub fn build_config(
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    options: &PipelineOptions,
) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match &options.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(input) = input {
        config.input_path = input;
    }
    if let Some(output_dir) = output_dir {
        config.output_dir = output_dir;
    }
    if options.detect_delimiter {
        config.parser.delimiter = None;
    } else if let Some(d) = options.delimiter {
        config.parser.delimiter = Some(d);
    }
    if options.strict {
        config.transform.strict_categories = true;
    }

    Ok(config)
}
