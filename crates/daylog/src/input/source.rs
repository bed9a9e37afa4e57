//! Raw table and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spellings a CSV reader conventionally treats as a missing cell.
///
/// Matched exactly: `None` is missing, `none` and ` NA` are text.
const NULL_SPELLINGS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Metadata about the loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

/// Parsed tabular data with every cell kept as its source string.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers, exactly as found.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the first column with the given header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        NULL_SPELLINGS.contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::new(
            vec!["Fecha".to_string(), "Status".to_string()],
            vec![
                vec!["01/03/2024".to_string(), "Complete".to_string()],
                vec!["02/03/2024".to_string(), "In progress".to_string()],
            ],
        )
    }

    #[test]
    fn test_column_lookup() {
        let table = sample();
        assert_eq!(table.column_index("Status"), Some(1));
        assert_eq!(table.column_index("status"), None);
        assert_eq!(
            table.column_values(1).collect::<Vec<_>>(),
            vec!["Complete", "In progress"]
        );
        assert_eq!(table.get(1, 0), Some("02/03/2024"));
        assert_eq!(table.get(2, 0), None);
    }

    #[test]
    fn test_is_null_value() {
        assert!(DataTable::is_null_value(""));
        assert!(DataTable::is_null_value("NA"));
        assert!(DataTable::is_null_value("NULL"));
        assert!(DataTable::is_null_value("#N/A"));
        assert!(DataTable::is_null_value("N/A"));
        assert!(DataTable::is_null_value("NaN"));
        assert!(DataTable::is_null_value("null"));
        assert!(DataTable::is_null_value("None"));
        assert!(DataTable::is_null_value("<NA>"));
        assert!(!DataTable::is_null_value("No"));
        assert!(!DataTable::is_null_value("0"));
        assert!(!DataTable::is_null_value("-"));
    }

    #[test]
    fn test_null_spellings_are_case_sensitive() {
        assert!(DataTable::is_null_value("None"));
        assert!(!DataTable::is_null_value("none"));
        assert!(!DataTable::is_null_value("NONE"));
        assert!(!DataTable::is_null_value("Null"));
        assert!(!DataTable::is_null_value("Na"));
    }

    #[test]
    fn test_whitespace_is_not_null() {
        assert!(!DataTable::is_null_value("   "));
        assert!(!DataTable::is_null_value(" NA"));
        assert!(!DataTable::is_null_value("NA "));
    }
}
