//! Transformer that turns the raw daily log into the normalized table.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DaylogError, Result};
use crate::input::DataTable;
use crate::table::{Table, Value};

use super::categorical::{CategoricalMap, Encoding};
use super::expand::Vocabulary;
use super::operations::{RowAudit, TransformChange, TransformOperation, TransformReport};

/// Strict `D/M/YYYY` shape; day and month take one or two digits.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid date regex"));

pub const DATE_SOURCE: &str = "fecha";
pub const DATE_COLUMN: &str = "date";
pub const DAY_ID: &str = "day_id";
pub const STATUS: &str = "status";
pub const PRODUCTIVENESS: &str = "productiveness";
pub const ACHIEVEMENTS: &str = "important_achievements";
pub const LEARNING: &str = "learning";
pub const DAILY_OVERVIEW: &str = "daily_overview";

/// Columns the transformer reads, after header normalization.
pub const REQUIRED_COLUMNS: &[&str] = &[DATE_SOURCE, STATUS, PRODUCTIVENESS, ACHIEVEMENTS, LEARNING];

/// Transformer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Abort on categorical values outside their closed set instead of
    /// recording them as missing.
    pub strict_categories: bool,
    /// Separator between tokens of the learning field.
    pub learning_separator: String,
    /// Literal written into missing achievement cells.
    pub achievements_default: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            strict_categories: false,
            learning_separator: ", ".to_string(),
            achievements_default: "No".to_string(),
        }
    }
}

/// Lowercase a header and replace each space with an underscore.
pub fn normalize_header(header: &str) -> String {
    header.to_lowercase().replace(' ', "_")
}

/// Parse a `DD/MM/YYYY` date. Returns `None` on any deviation.
pub fn parse_log_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(value)?;
    let day = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let year = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Applies the fixed sequence of daily-log transformations.
pub struct Transformer {
    config: TransformConfig,
}

impl Transformer {
    /// Create a transformer with default configuration.
    pub fn new() -> Self {
        Self::with_config(TransformConfig::default())
    }

    /// Create a transformer with custom configuration.
    pub fn with_config(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The operations `transform` runs, in order.
    ///
    /// Row ids are assigned before any step that could touch row order.
    pub fn plan(&self) -> Vec<TransformOperation> {
        vec![
            TransformOperation::NormalizeHeaders,
            TransformOperation::ParseDate {
                source: DATE_SOURCE.to_string(),
                target: DATE_COLUMN.to_string(),
            },
            TransformOperation::AssignRowId {
                column: DAY_ID.to_string(),
            },
            TransformOperation::Encode {
                column: STATUS.to_string(),
                mapping: CategoricalMap::status(),
            },
            TransformOperation::Encode {
                column: PRODUCTIVENESS.to_string(),
                mapping: CategoricalMap::productiveness(),
            },
            TransformOperation::FillMissing {
                column: ACHIEVEMENTS.to_string(),
                value: self.config.achievements_default.clone(),
            },
            TransformOperation::ExpandMultiValue {
                column: LEARNING.to_string(),
                separator: self.config.learning_separator.clone(),
            },
        ]
    }

    /// Transform a raw table. The input is left untouched.
    pub fn transform(&self, raw: &DataTable) -> Result<(Table, TransformReport)> {
        check_required(raw)?;

        let mut table = to_typed(raw);
        let mut report = TransformReport::new();
        report.rows = table.row_count();
        let initial_columns = table.column_count();

        for operation in self.plan() {
            let change = self.apply_operation(&operation, &mut table, &mut report)?;
            tracing::debug!(
                step = %change.description,
                values_changed = change.values_changed,
                "Applied transformation"
            );
            report.add_change(change);
        }

        // fecha and learning are replaced, everything else is new
        report.columns_added = (table.column_count() + 2).saturating_sub(initial_columns);

        for audit in &report.unmapped {
            tracing::warn!(
                row = audit.row,
                column = %audit.column,
                value = %audit.original_value,
                "Unmapped categorical value recorded as missing"
            );
        }

        Ok((table, report))
    }

    fn apply_operation(
        &self,
        operation: &TransformOperation,
        table: &mut Table,
        report: &mut TransformReport,
    ) -> Result<TransformChange> {
        match operation {
            TransformOperation::NormalizeHeaders => Ok(self.apply_normalize_headers(table)),
            TransformOperation::ParseDate { source, target } => {
                self.apply_parse_date(source, target, table)
            }
            TransformOperation::AssignRowId { column } => self.apply_row_id(column, table),
            TransformOperation::Encode { column, mapping } => {
                self.apply_encode(column, mapping, table, report)
            }
            TransformOperation::FillMissing { column, value } => {
                self.apply_fill_missing(column, value, table)
            }
            TransformOperation::ExpandMultiValue { column, separator } => {
                self.apply_expand(column, separator, table, report)
            }
        }
    }

    fn apply_normalize_headers(&self, table: &mut Table) -> TransformChange {
        let mut changed = 0;
        for column in &mut table.columns {
            let normalized = normalize_header(column);
            if *column != normalized {
                *column = normalized;
                changed += 1;
            }
        }

        TransformChange {
            description: TransformOperation::NormalizeHeaders.description(),
            column: String::new(),
            values_changed: changed,
        }
    }

    fn apply_parse_date(&self, source: &str, target: &str, table: &mut Table) -> Result<TransformChange> {
        let raw = table.remove_column(source)?;

        let mut parsed = 0;
        let dates = raw
            .into_iter()
            .enumerate()
            .map(|(row_idx, cell)| match cell {
                Value::Text(s) => match parse_log_date(&s) {
                    Some(date) => {
                        parsed += 1;
                        Ok(Value::Date(date))
                    }
                    None => Err(DaylogError::DateParse {
                        row: row_idx + 1,
                        value: s,
                    }),
                },
                other => Ok(other),
            })
            .collect::<Result<Vec<_>>>()?;

        table.push_column(target, dates)?;

        Ok(TransformChange {
            description: format!("Parsed {} date(s) from '{}' into '{}'", parsed, source, target),
            column: target.to_string(),
            values_changed: parsed,
        })
    }

    fn apply_row_id(&self, column: &str, table: &mut Table) -> Result<TransformChange> {
        let ids = (1..=table.row_count() as i64).map(Value::Integer).collect();
        table.push_column(column, ids)?;

        Ok(TransformChange {
            description: format!("Assigned '{}' 1..={}", column, table.row_count()),
            column: column.to_string(),
            values_changed: table.row_count(),
        })
    }

    fn apply_encode(
        &self,
        column: &str,
        mapping: &CategoricalMap,
        table: &mut Table,
        report: &mut TransformReport,
    ) -> Result<TransformChange> {
        let strict = self.config.strict_categories;
        let mut encoded = 0;

        table.map_column(column, |row_idx, cell| {
            let Value::Text(literal) = cell else {
                return Ok(Value::Missing);
            };
            match mapping.encode(&literal) {
                Encoding::Code(code) => {
                    encoded += 1;
                    Ok(Value::Integer(code))
                }
                Encoding::Unmapped if strict => Err(DaylogError::UnmappedCategory {
                    column: column.to_string(),
                    row: row_idx + 1,
                    value: literal,
                }),
                Encoding::Unmapped => {
                    report.unmapped.push(RowAudit {
                        row: row_idx,
                        column: column.to_string(),
                        original_value: literal,
                        reason: format!("not one of the {} known '{}' values", mapping.len(), column),
                    });
                    Ok(Value::Missing)
                }
            }
        })?;

        let dropped = report.unmapped_in(column).count();
        Ok(TransformChange {
            description: format!(
                "Encoded {} value(s) in '{}' ({} unmapped)",
                encoded, column, dropped
            ),
            column: column.to_string(),
            values_changed: encoded,
        })
    }

    fn apply_fill_missing(&self, column: &str, value: &str, table: &mut Table) -> Result<TransformChange> {
        let mut filled = 0;
        table.map_column(column, |_, cell| {
            Ok(if cell.is_missing() {
                filled += 1;
                Value::Text(value.to_string())
            } else {
                cell
            })
        })?;

        Ok(TransformChange {
            description: format!("Filled {} missing value(s) in '{}' with '{}'", filled, column, value),
            column: column.to_string(),
            values_changed: filled,
        })
    }

    fn apply_expand(
        &self,
        column: &str,
        separator: &str,
        table: &mut Table,
        report: &mut TransformReport,
    ) -> Result<TransformChange> {
        let cells = table.remove_column(column)?;

        let vocabulary = Vocabulary::from_cells(&cells, separator);
        let matrix = vocabulary.indicator_matrix(&cells, separator);

        for (i, token) in vocabulary.tokens().enumerate() {
            let name = indicator_name(column, token, table);
            if name != token {
                tracing::warn!(token, column = %name, "Learning token clashes with a column, renamed");
            }
            let values = matrix.iter().map(|row| Value::Boolean(row[i])).collect();
            table.push_column(&name, values)?;
        }

        let flagged = matrix.iter().flatten().filter(|&&b| b).count();
        report.vocabulary = vocabulary.tokens().map(str::to_string).collect();

        Ok(TransformChange {
            description: format!(
                "Expanded '{}' into {} indicator column(s)",
                column,
                vocabulary.len()
            ),
            column: column.to_string(),
            values_changed: flagged,
        })
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Column name for a token's indicator: the token itself, or
/// `<source>_<token>` when the token already names a column.
fn indicator_name(source: &str, token: &str, table: &Table) -> String {
    if table.column_index(token).is_some() {
        format!("{}_{}", source, token)
    } else {
        token.to_string()
    }
}

/// Fail early when a column the plan reads is absent.
fn check_required(raw: &DataTable) -> Result<()> {
    let headers: Vec<String> = raw.headers.iter().map(|h| normalize_header(h)).collect();
    for &required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DaylogError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

/// Lift raw strings into typed cells; null spellings become `Missing`.
fn to_typed(raw: &DataTable) -> Table {
    let rows = raw
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| {
                    if DataTable::is_null_value(cell) {
                        Value::Missing
                    } else {
                        Value::Text(cell.clone())
                    }
                })
                .collect()
        })
        .collect();

    Table::new(raw.headers.clone(), rows)
}
