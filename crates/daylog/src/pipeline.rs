//! Main pipeline struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::output::{split_tables, SavedTables, TablePair, TableWriter};
use crate::table::{ColumnSchema, Table};
use crate::transform::{TransformReport, Transformer};

/// Result of loading and transforming without writing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Schema of the transformed table.
    pub schema: Vec<ColumnSchema>,
    /// What the transformer did.
    pub report: TransformReport,
}

/// Result of a full pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// What the transformer did.
    pub report: TransformReport,
    /// The tables that were written.
    pub tables: TablePair,
    /// Where they were written.
    pub saved: SavedTables,
}

/// Loader, transformer, splitter and writer wired together.
pub struct Pipeline {
    config: PipelineConfig,
    parser: Parser,
    transformer: Transformer,
    writer: TableWriter,
}

impl Pipeline {
    /// Build a pipeline from its configuration.
    pub fn new(config: PipelineConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let transformer = Transformer::with_config(config.transform.clone());
        let writer = TableWriter::with_config(config.writer.clone());

        Self {
            config,
            parser,
            transformer,
            writer,
        }
    }

    /// Read the raw table from a file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Normalize a raw table.
    pub fn transform(&self, raw: &DataTable) -> Result<(Table, TransformReport)> {
        self.transformer.transform(raw)
    }

    /// Split a transformed table into its text and properties tables.
    pub fn split(&self, table: &Table) -> Result<TablePair> {
        split_tables(table)
    }

    /// Write both tables into the configured output directory.
    pub fn save(&self, tables: &TablePair) -> Result<SavedTables> {
        self.writer.save(tables, &self.config.output_dir)
    }

    /// Load and transform the configured input without writing.
    pub fn check(&self) -> Result<CheckResult> {
        self.config.validate_input()?;

        let (raw, source) = self.load(&self.config.input_path)?;
        let (table, report) = self.transform(&raw)?;

        Ok(CheckResult {
            source,
            schema: table.schema(),
            report,
        })
    }

    /// Run every stage: load, transform, split, save.
    ///
    /// Nothing is written unless the earlier stages succeed.
    pub fn run(&self) -> Result<PipelineOutput> {
        self.config.validate()?;

        let (raw, source) = self.load(&self.config.input_path)?;
        let (table, report) = self.transform(&raw)?;
        let tables = self.split(&table)?;
        let saved = self.save(&tables)?;

        tracing::info!(
            rows = report.rows,
            learning_columns = report.vocabulary.len(),
            unmapped = report.unmapped.len(),
            "Data transformation complete"
        );

        Ok(PipelineOutput {
            source,
            report,
            tables,
            saved,
        })
    }
}
