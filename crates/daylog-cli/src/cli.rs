//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use daylog::BoolFormat;

/// Daylog: split a daily-log CSV export into text and properties tables
#[derive(Parser)]
#[command(name = "daylog")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transform the export and write text_table.csv and properties_table.csv
    Run {
        /// Path to the raw daily-log CSV (default: input_path from --config)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Directory for the output tables (default: output_dir from --config)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        #[command(flatten)]
        options: PipelineOptions,

        /// How boolean learning columns are written (true-false, numeric)
        #[arg(long)]
        bool_format: Option<BoolFormat>,
    },

    /// Load and transform without writing; report schema and data quality
    Check {
        /// Path to the raw daily-log CSV (default: input_path from --config)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[command(flatten)]
        options: PipelineOptions,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by every command that runs the transformer.
#[derive(Args, Clone, Debug, Default)]
pub struct PipelineOptions {
    /// JSON configuration file; command-line values override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter of the input (default: ',')
    #[arg(short, long, conflicts_with = "detect_delimiter")]
    pub delimiter: Option<char>,

    /// Auto-detect the input delimiter
    #[arg(long)]
    pub detect_delimiter: bool,

    /// Fail on status/productiveness values outside the known set
    #[arg(long)]
    pub strict: bool,
}
