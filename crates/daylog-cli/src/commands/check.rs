//! Check command - transform without writing and report data quality.

use std::path::PathBuf;

use colored::Colorize;
use daylog::Pipeline;

use super::build_config;
use crate::cli::PipelineOptions;

pub fn run(
    input: Option<PathBuf>,
    options: PipelineOptions,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(input, None, &options)?;
    config.validate_input()?;

    if !config.input_path.exists() {
        return Err(format!("File not found: {}", config.input_path.display()).into());
    }

    let result = Pipeline::new(config).check()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Checked".cyan().bold(),
        result.source.file.white(),
        result.source.row_count,
        result.source.column_count
    );
    if verbose {
        println!("  {}", result.source.hash.dimmed());
    }

    println!();
    println!("{}", "Schema:".yellow().bold());
    for col in &result.schema {
        let missing = if col.missing_count > 0 {
            format!("{} missing", col.missing_count).yellow()
        } else {
            "".normal()
        };
        println!("  {:28} {:8} {}", col.name, col.column_type.to_string(), missing);
    }

    println!();
    if result.report.vocabulary.is_empty() {
        println!("No learning topics found");
    } else {
        println!(
            "Learning topics: {}",
            result.report.vocabulary.join(", ").white()
        );
    }

    if result.report.is_clean() {
        println!("{}", "All categorical values recognized".green());
    } else {
        println!();
        println!(
            "{} {} unrecognized categorical value(s):",
            "Warning:".yellow().bold(),
            result.report.unmapped.len()
        );
        for audit in &result.report.unmapped {
            println!(
                "  row {:>4}  {:16} {:?}",
                audit.row + 1,
                audit.column.white().bold(),
                audit.original_value
            );
        }
    }

    Ok(())
}
