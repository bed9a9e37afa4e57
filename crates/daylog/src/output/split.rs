//! Partition of the transformed table into text and properties tables.

use crate::error::Result;
use crate::table::Table;
use crate::transform::{DAILY_OVERVIEW, DAY_ID};

/// The two output projections, joined by `day_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePair {
    /// `day_id` and `daily_overview`.
    pub text: Table,
    /// Every transformed column except `daily_overview`.
    pub properties: Table,
}

/// Split a transformed table into its text and properties projections.
pub fn split_tables(table: &Table) -> Result<TablePair> {
    let text = table.select(&[DAY_ID, DAILY_OVERVIEW])?;
    let properties = table.without(&[DAILY_OVERVIEW]);

    Ok(TablePair { text, properties })
}
