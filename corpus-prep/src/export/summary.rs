//! Extraction summary: per-split counters collected while writing a corpus.
//!
//! Assembled once by [`DatasetWriter::close`](crate::export::DatasetWriter),
//! serialized into the final run report and logged.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-split statistics for one output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SplitCounts {
    /// Samples appended to the split's file.
    pub samples: u64,
    /// Paths for path-context output, nodes for tree output.
    pub units: u64,
    /// Mean units per sample; 0.0 for an empty split.
    pub mean_units: f64,
}

impl SplitCounts {
    /// Recomputes the mean from the raw counters.
    pub(crate) fn finalized(mut self) -> Self {
        self.mean_units = if self.samples == 0 {
            0.0
        } else {
            self.units as f64 / self.samples as f64
        };
        self
    }
}

/// Statistics for one enabled output format, keyed by split name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatSummary {
    /// Format name as used in file stems, e.g. `path_contexts`.
    pub format: String,
    pub splits: BTreeMap<String, SplitCounts>,
}

/// Everything a closed writer reports about the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// ISO 8601 UTC timestamp when the summary was produced.
    pub generated_at: String,

    /// One entry per enabled output format.
    pub formats: Vec<FormatSummary>,

    /// Distinct node types numbered during the run, when numbering was on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_size: Option<usize>,
}

impl ExtractionSummary {
    pub(crate) fn new(formats: Vec<FormatSummary>, vocabulary_size: Option<usize>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            formats,
            vocabulary_size,
        }
    }

    /// Counts looked up by format name; `None` for a format that was not
    /// enabled.
    pub fn split_counts(&self, format: &str, split: &str) -> Option<SplitCounts> {
        self.formats
            .iter()
            .find(|f| f.format == format)
            .and_then(|f| f.splits.get(split).copied())
    }
}
