//! Dataset split markers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Holdout split a sample belongs to.
///
/// Routing accepts `Option<Dataset>`; `None` means the front-end assigned no
/// split and the sample is bucketed with [`Dataset::Train`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Train,
    Val,
    Test,
}

impl Dataset {
    /// Every split, in stable table order.
    pub const ALL: [Dataset; 3] = [Dataset::Train, Dataset::Val, Dataset::Test];

    /// Wire name used in holdout fields and output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Train => "train",
            Dataset::Val => "val",
            Dataset::Test => "test",
        }
    }

    /// Parses a wire name back into a split.
    pub fn from_name(name: &str) -> Option<Dataset> {
        match name {
            "train" => Some(Dataset::Train),
            "val" => Some(Dataset::Val),
            "test" => Some(Dataset::Test),
            _ => None,
        }
    }

    /// Stable position for indexing per-split tables.
    pub fn index(&self) -> usize {
        match self {
            Dataset::Train => 0,
            Dataset::Val => 1,
            Dataset::Test => 2,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
