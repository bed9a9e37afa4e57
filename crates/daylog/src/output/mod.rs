//! Splitting and persistence of the transformed table.

mod split;
mod writer;

pub use split::{split_tables, TablePair};
pub use writer::{
    read_table, BoolFormat, SavedTables, TableWriter, WriterConfig, PROPERTIES_TABLE_FILE,
    TEXT_TABLE_FILE,
};
