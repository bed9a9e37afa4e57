//! Transformation of the raw daily log into the normalized table.

mod categorical;
mod engine;
mod expand;
mod operations;

pub use categorical::{CategoricalMap, Encoding, MAX_STARS, STAR};
pub use engine::{
    normalize_header, parse_log_date, TransformConfig, Transformer, ACHIEVEMENTS, DAILY_OVERVIEW,
    DATE_COLUMN, DATE_SOURCE, DAY_ID, LEARNING, PRODUCTIVENESS, REQUIRED_COLUMNS, STATUS,
};
pub use expand::{split_tokens, Vocabulary};
pub use operations::{RowAudit, TransformChange, TransformOperation, TransformReport};
