//! Typed, column-named table threaded through the pipeline.

use serde::{Deserialize, Serialize};

use super::value::{ColumnType, Value};
use crate::error::{DaylogError, Result};

/// Schema summary for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name.
    pub name: String,
    /// Zero-based position in the table.
    pub position: usize,
    /// Type shared by the non-missing cells.
    pub column_type: ColumnType,
    /// Number of missing cells.
    pub missing_count: usize,
}

/// A table of typed values in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, in output order.
    pub columns: Vec<String>,
    /// Row data; every row has `columns.len()` cells.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Position of a column that must exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| DaylogError::MissingColumn(name.to_string()))
    }

    /// Get all values of a column by name.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get a cell by row position and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.get(row, col)
    }

    /// Append a column at the right edge.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.column_index(&name).is_some() {
            return Err(DaylogError::DuplicateColumn(name));
        }
        debug_assert_eq!(values.len(), self.rows.len());

        self.columns.push(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Remove a column and return its values.
    pub fn remove_column(&mut self, name: &str) -> Result<Vec<Value>> {
        let index = self.require_column(name)?;
        self.columns.remove(index);
        Ok(self.rows.iter_mut().map(|row| row.remove(index)).collect())
    }

    /// Replace every value in a column using `f(row_index, old_value)`.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(usize, Value) -> Result<Value>,
    {
        let index = self.require_column(name)?;
        for (row_idx, row) in self.rows.iter_mut().enumerate() {
            let old = std::mem::replace(&mut row[index], Value::Missing);
            row[index] = f(row_idx, old)?;
        }
        Ok(())
    }

    /// Project the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indices = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.project(&indices))
    }

    /// Every column except the named ones, in table order.
    pub fn without(&self, names: &[&str]) -> Table {
        let indices: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !names.contains(&c.as_str()))
            .map(|(i, _)| i)
            .collect();

        self.project(&indices)
    }

    fn project(&self, indices: &[usize]) -> Table {
        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Table::new(columns, rows)
    }

    /// Type of a column, from its first non-missing cell.
    pub fn column_type(&self, index: usize) -> ColumnType {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(Value::column_type))
            .next()
            .unwrap_or(ColumnType::Unknown)
    }

    /// Describe every column.
    pub fn schema(&self) -> Vec<ColumnSchema> {
        self.columns
            .iter()
            .enumerate()
            .map(|(position, name)| ColumnSchema {
                name: name.clone(),
                position,
                column_type: self.column_type(position),
                missing_count: self
                    .rows
                    .iter()
                    .filter(|row| row[position].is_missing())
                    .count(),
            })
            .collect()
    }
}
