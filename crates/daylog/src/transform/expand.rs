//! Expansion of a delimited multi-value field into indicator columns.

use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::table::Value;

/// Split a cell into its token set. Empty tokens are discarded; tokens are
/// not trimmed.
pub fn split_tokens<'a>(cell: &'a Value, separator: &str) -> BTreeSet<&'a str> {
    match cell {
        Value::Text(s) => s.split(separator).filter(|t| !t.is_empty()).collect(),
        _ => BTreeSet::new(),
    }
}

/// Every distinct token observed in a column, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: IndexSet<String>,
}

impl Vocabulary {
    /// Collect the vocabulary of a column in a single pass.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a Value>, separator: &str) -> Self {
        let mut seen = BTreeSet::new();
        for cell in cells {
            seen.extend(split_tokens(cell, separator));
        }
        Self {
            tokens: seen.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.get_index_of(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.as_str())
    }

    /// Row-major indicator matrix: `matrix[row][i]` is true iff the row
    /// contains the `i`-th vocabulary token.
    pub fn indicator_matrix<'a>(
        &self,
        cells: impl IntoIterator<Item = &'a Value>,
        separator: &str,
    ) -> Vec<Vec<bool>> {
        cells
            .into_iter()
            .map(|cell| {
                let mut row = vec![false; self.len()];
                for token in split_tokens(cell, separator) {
                    if let Some(i) = self.index_of(token) {
                        row[i] = true;
                    }
                }
                row
            })
            .collect()
    }
}
