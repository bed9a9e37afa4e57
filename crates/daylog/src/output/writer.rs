//! CSV persistence for the output tables.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::split::TablePair;
use crate::error::{DaylogError, Result};
use crate::input::{DataTable, Parser, ParserConfig};
use crate::table::{Table, Value};

/// File name of the text table inside the output directory.
pub const TEXT_TABLE_FILE: &str = "text_table.csv";

/// File name of the properties table inside the output directory.
pub const PROPERTIES_TABLE_FILE: &str = "properties_table.csv";

/// How boolean cells are spelled in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoolFormat {
    /// `true` / `false`.
    #[default]
    TrueFalse,
    /// `1` / `0`.
    Numeric,
}

impl std::str::FromStr for BoolFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "true-false" | "truefalse" | "bool" => Ok(BoolFormat::TrueFalse),
            "numeric" | "01" | "int" => Ok(BoolFormat::Numeric),
            _ => Err(format!("Unknown bool format: {}. Use true-false or numeric.", s)),
        }
    }
}

impl std::fmt::Display for BoolFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoolFormat::TrueFalse => write!(f, "true-false"),
            BoolFormat::Numeric => write!(f, "numeric"),
        }
    }
}

/// Writer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Spelling of boolean indicator cells.
    pub bool_format: BoolFormat,
}

/// Paths of the files written by [`TableWriter::save`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTables {
    pub text_path: PathBuf,
    pub properties_path: PathBuf,
}

/// Serializes tables as comma-separated files with a header row.
pub struct TableWriter {
    config: WriterConfig,
}

impl TableWriter {
    /// Create a writer with default configuration.
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    /// Create a writer with custom configuration.
    pub fn with_config(config: WriterConfig) -> Self {
        Self { config }
    }

    /// Write both tables into `output_dir`, creating it if needed and
    /// overwriting any previous output.
    pub fn save(&self, tables: &TablePair, output_dir: impl AsRef<Path>) -> Result<SavedTables> {
        let output_dir = output_dir.as_ref();

        fs::create_dir_all(output_dir).map_err(|e| DaylogError::io(output_dir, e))?;

        let text_path = output_dir.join(TEXT_TABLE_FILE);
        let properties_path = output_dir.join(PROPERTIES_TABLE_FILE);

        self.write_table(&tables.text, &text_path)?;
        self.write_table(&tables.properties, &properties_path)?;

        tracing::info!(
            output_dir = %output_dir.display(),
            text_rows = tables.text.row_count(),
            properties_columns = tables.properties.column_count(),
            "Data saved"
        );

        Ok(SavedTables {
            text_path,
            properties_path,
        })
    }

    /// Write one table to `path`.
    ///
    /// The table is written to `<path>.tmp` and renamed into place, so the
    /// target is either the old file or the complete new one.
    pub fn write_table(&self, table: &Table, path: &Path) -> Result<()> {
        let tmp_path = tmp_sibling(path);

        if let Err(e) = self.write_csv(table, &tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DaylogError::io(path, e)
        })
    }

    fn write_csv(&self, table: &Table, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| DaylogError::io(path, e))?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row.iter().map(|v| self.format_value(v)))?;
        }

        writer.flush().map_err(|e| DaylogError::io(path, e))?;
        Ok(())
    }

    /// Render a cell the way it appears in the output file.
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Text(s) => s.clone(),
            Value::Integer(n) => n.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Boolean(b) => match (self.config.bool_format, b) {
                (BoolFormat::TrueFalse, true) => "true".to_string(),
                (BoolFormat::TrueFalse, false) => "false".to_string(),
                (BoolFormat::Numeric, true) => "1".to_string(),
                (BoolFormat::Numeric, false) => "0".to_string(),
            },
            Value::Missing => String::new(),
        }
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a written table back as strings.
pub fn read_table(path: impl AsRef<Path>) -> Result<DataTable> {
    let parser = Parser::with_config(ParserConfig::default());
    let (table, _) = parser.parse_file(path)?;
    Ok(table)
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
