//! Daylog: normalizer for a personal daily-log CSV export.
//!
//! A run loads the raw export, normalizes its schema, encodes the
//! categorical fields, and writes two related tables keyed by `day_id`:
//!
//! - `text_table.csv`: `day_id` and the free-text `daily_overview`
//! - `properties_table.csv`: every other transformed column
//!
//! # Pipeline
//!
//! 1. **Load** ([`input`]): the CSV is read as strings, nothing inferred.
//! 2. **Transform** ([`transform`]): headers are lowercased, `fecha` becomes
//!    `date`, rows are numbered, `status` and `productiveness` are mapped to
//!    integer codes, blank achievements become `"No"`, and `learning` is
//!    expanded into one boolean column per topic.
//! 3. **Split and save** ([`output`]).
//!
//! # Example
//!
//! ```no_run
//! use daylog::{Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new("data/raw/daily_calendar.csv", "data/processed");
//! let output = Pipeline::new(config).run().unwrap();
//!
//! println!("Rows: {}", output.report.rows);
//! println!("Learning topics: {:?}", output.report.vocabulary);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod table;
pub mod transform;

mod pipeline;

pub use crate::pipeline::{CheckResult, Pipeline, PipelineOutput};
pub use config::PipelineConfig;
pub use error::{DaylogError, Result};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use output::{split_tables, BoolFormat, TablePair, TableWriter, WriterConfig};
pub use table::{ColumnSchema, ColumnType, Table, Value};
pub use transform::{TransformConfig, TransformReport, Transformer};
