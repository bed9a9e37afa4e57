//! Closed lookup tables from category literals to integer codes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One productiveness star: U+2B50 followed by the emoji presentation selector.
pub const STAR: &str = "\u{2B50}\u{FE0F}";

/// Highest productiveness rating.
pub const MAX_STARS: usize = 5;

/// Outcome of looking a literal up in a [`CategoricalMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The literal belongs to the closed set.
    Code(i64),
    /// The literal is outside the closed set.
    Unmapped,
}

/// A fixed mapping from string literals to integer codes.
///
/// Lookups are exact: no trimming or case folding is applied, so
/// `"complete"` is unmapped for the status map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalMap {
    entries: IndexMap<String, i64>,
}

impl CategoricalMap {
    /// Build a map from `(literal, code)` pairs.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Task status: "In progress" is 0, "Complete" is 1.
    pub fn status() -> Self {
        Self::new([("In progress", 0), ("Complete", 1)])
    }

    /// Productiveness: one to five stars map to their count.
    pub fn productiveness() -> Self {
        Self::new((1..=MAX_STARS).map(|n| (STAR.repeat(n), n as i64)))
    }

    /// Look up a literal.
    pub fn encode(&self, literal: &str) -> Encoding {
        match self.entries.get(literal) {
            Some(&code) => Encoding::Code(code),
            None => Encoding::Unmapped,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
