//! Typed table representation for transformed data.

mod frame;
mod value;

pub use frame::{ColumnSchema, Table};
pub use value::{ColumnType, Value};
