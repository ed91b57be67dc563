//! Configuration data structures for corpus extraction.
//!
//! All structs are `serde`-friendly so they can be loaded from YAML and
//! overridden from the environment.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Corpus output flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Space/comma/pipe-delimited path contexts (`.c2s`).
    PathContexts,
    /// Index-based JSON tree lines (`.jsonl`).
    Trees,
}

impl OutputFormat {
    /// File name stem for this format's split files.
    pub fn file_stem(&self) -> &'static str {
        match self {
            OutputFormat::PathContexts => "path_contexts",
            OutputFormat::Trees => "trees",
        }
    }

    /// File extension for this format's split files.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::PathContexts => "c2s",
            OutputFormat::Trees => "jsonl",
        }
    }

    /// Parses the snake_case wire name.
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name {
            "path_contexts" => Some(OutputFormat::PathContexts),
            "trees" => Some(OutputFormat::Trees),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Top-level extraction settings.
///
/// Every field is optional in YAML (defaults apply); unknown keys are
/// rejected rather than silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Maximum branch-length sum below a path's common ancestor.
    pub path_width: usize,
    /// Maximum node count of a mined path.
    pub path_length: usize,
    /// Per-sample path cap for train-like splits; `None` keeps everything.
    pub max_paths_in_train: Option<usize>,
    /// Per-sample path cap for val/test splits; `None` keeps everything.
    pub max_paths_in_test: Option<usize>,
    /// Replace node types with stable integer ids and persist the table.
    pub nodes_to_numbers: bool,
    /// Emit resolved token types for path endpoints and tree nodes.
    pub include_token_types: bool,
    /// Corpus destination directory.
    pub output_directory: PathBuf,
    /// Enabled output formats.
    pub formats: Vec<OutputFormat>,
    /// Seed for path sampling; set it for reproducible corpora.
    pub shuffle_seed: Option<u64>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            path_width: 8,
            path_length: 9,
            max_paths_in_train: None,
            max_paths_in_test: None,
            nodes_to_numbers: false,
            include_token_types: false,
            output_directory: PathBuf::from("corpus_data"),
            formats: vec![OutputFormat::PathContexts],
            shuffle_seed: None,
        }
    }
}

impl ExtractorConfig {
    /// Validate config sanity (no degenerate or absurd values).
    pub fn validate(&self) -> Result<()> {
        if self.path_length == 0 {
            return Err(Error::Config(
                "`path_length` must be greater than 0".into(),
            ));
        }
        if self.path_width == 0 {
            return Err(Error::Config("`path_width` must be greater than 0".into()));
        }
        if self.max_paths_in_train == Some(0) {
            return Err(Error::Config(
                "`max_paths_in_train` must be greater than 0".into(),
            ));
        }
        if self.max_paths_in_test == Some(0) {
            return Err(Error::Config(
                "`max_paths_in_test` must be greater than 0".into(),
            ));
        }
        if self.formats.is_empty() {
            return Err(Error::Config(
                "`formats` must name at least one output format".into(),
            ));
        }
        for (i, format) in self.formats.iter().enumerate() {
            if self.formats[..i].contains(format) {
                return Err(Error::Config(format!(
                    "`formats` lists {} more than once",
                    format
                )));
            }
        }
        Ok(())
    }
}
