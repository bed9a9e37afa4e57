//! Daylog CLI - normalize a daily-log CSV export.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            input,
            output_dir,
            options,
            bool_format,
        } => commands::run::run(input, output_dir, options, bool_format, cli.verbose),

        Commands::Check {
            input,
            options,
            json,
        } => commands::check::run(input, options, json, cli.verbose),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
