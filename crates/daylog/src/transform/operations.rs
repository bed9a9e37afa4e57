//! Transformation steps and the audit report they produce.

use serde::{Deserialize, Serialize};

use super::categorical::CategoricalMap;

/// A single transformation step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransformOperation {
    /// Lowercase headers and replace spaces with underscores.
    NormalizeHeaders,

    /// Parse `DD/MM/YYYY` strings into dates under a new column name.
    ParseDate { source: String, target: String },

    /// Append a 1-based row sequence number.
    AssignRowId { column: String },

    /// Replace literals with integer codes from a closed map.
    Encode {
        column: String,
        mapping: CategoricalMap,
    },

    /// Replace missing values with a literal.
    FillMissing { column: String, value: String },

    /// Replace a delimited column with one indicator column per token.
    ExpandMultiValue { column: String, separator: String },
}

impl TransformOperation {
    /// Get a human-readable description of the operation.
    pub fn description(&self) -> String {
        match self {
            TransformOperation::NormalizeHeaders => "Normalize column names".to_string(),
            TransformOperation::ParseDate { source, target } => {
                format!("Parse '{}' as DD/MM/YYYY → '{}'", source, target)
            }
            TransformOperation::AssignRowId { column } => {
                format!("Assign row sequence → '{}'", column)
            }
            TransformOperation::Encode { column, mapping } => {
                format!("Encode '{}' ({} known values)", column, mapping.len())
            }
            TransformOperation::FillMissing { column, value } => {
                format!("Fill missing '{}' with '{}'", column, value)
            }
            TransformOperation::ExpandMultiValue { column, separator } => {
                format!("Expand '{}' on {:?} into indicator columns", column, separator)
            }
        }
    }
}

/// Result of running the transformer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformReport {
    /// Number of operations applied.
    pub operations_applied: usize,

    /// Number of rows transformed.
    pub rows: usize,

    /// Number of columns added.
    pub columns_added: usize,

    /// Distinct tokens found while expanding multi-value columns.
    pub vocabulary: Vec<String>,

    /// Detailed changes for each operation.
    pub changes: Vec<TransformChange>,

    /// Categorical values that fell outside their closed set.
    pub unmapped: Vec<RowAudit>,
}

/// A single change made during transformation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformChange {
    /// Description of the change.
    pub description: String,

    /// Column affected (empty for table-wide steps).
    pub column: String,

    /// Number of values changed.
    pub values_changed: usize,
}

/// A data-quality note for a single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based).
    pub row: usize,

    /// Column the value came from.
    pub column: String,

    /// Value as found in the source.
    pub original_value: String,

    /// Why the value was flagged.
    pub reason: String,
}

impl TransformReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a change to the report.
    pub fn add_change(&mut self, change: TransformChange) {
        self.operations_applied += 1;
        self.changes.push(change);
    }

    /// Unmapped categorical values, in row order per column.
    pub fn unmapped_values(&self) -> &[RowAudit] {
        &self.unmapped
    }

    /// Unmapped values for one column.
    pub fn unmapped_in<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a RowAudit> {
        self.unmapped.iter().filter(move |a| a.column == column)
    }

    /// True when no categorical value was dropped.
    pub fn is_clean(&self) -> bool {
        self.unmapped.is_empty()
    }
}
