//! Run command - transform the export and write both tables.

use std::path::PathBuf;

use colored::Colorize;
use daylog::{BoolFormat, Pipeline};

use super::build_config;
use crate::cli::PipelineOptions;

pub fn run(
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    options: PipelineOptions,
    bool_format: Option<BoolFormat>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = build_config(input, output_dir, &options)?;
    if let Some(format) = bool_format {
        config.writer.bool_format = format;
    }
    config.validate()?;

    if !config.input_path.exists() {
        return Err(format!("File not found: {}", config.input_path.display()).into());
    }

    println!(
        "{} {}",
        "Transforming".cyan().bold(),
        config.input_path.display().to_string().white()
    );

    let output = Pipeline::new(config).run()?;

    if verbose {
        println!();
        println!("{}", "Steps:".yellow().bold());
        for change in &output.report.changes {
            println!("  {}", change.description);
        }
        println!();
    }

    println!(
        "Processed {} rows into {} property columns ({} learning topics)",
        output.report.rows.to_string().white().bold(),
        output.tables.properties.column_count().to_string().white().bold(),
        output.report.vocabulary.len().to_string().white().bold()
    );

    if !output.report.is_clean() {
        println!(
            "{} {} categorical value(s) were not recognized and were left empty",
            "Warning:".yellow().bold(),
            output.report.unmapped.len()
        );
        println!(
            "Run {} for details",
            format!("daylog check {}", output.source.path.display()).cyan()
        );
    }

    println!();
    println!(
        "{} {}",
        "Data saved to".green().bold(),
        output
            .saved
            .text_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
            .white()
    );
    println!("  {}", output.saved.text_path.display());
    println!("  {}", output.saved.properties_path.display());

    Ok(())
}
