//! Corpus preparation for ML-on-code: labeled ASTs in, training files out.
//!
//! This crate turns labeled syntax trees into model-ready corpora:
//! - Mine bounded leaf-to-leaf paths (`path_contexts`, `.c2s` lines)
//! - Serialize whole trees as compact JSON Lines (`trees`, `.jsonl`)
//! - Route every sample into `train` / `val` / `test` files with statistics
//!
//! The design is flat and splits responsibilities into focused modules:
//! [`model`] holds the tree contract, [`mining`] finds and samples paths,
//! [`format`] renders wire text, [`export`] owns files and vocabulary, and
//! [`run`] wires everything behind [`run::extract_corpus`].

pub mod config;
pub mod errors;
pub mod export;
pub mod format;
pub mod mining;
pub mod model;
pub mod run;
pub mod source;

#[cfg(test)]
mod testutil;

pub use config::{ExtractorConfig, OutputFormat};
pub use errors::{Error, Result};
pub use export::{DatasetWriter, ExtractionSummary, NodeTypeNumbering, SampleRecord};
pub use format::{PathContextFormatter, TreeFormatter};
pub use mining::{PathMiner, PathSampler};
pub use model::{AstPath, Dataset, LabeledTree, ParsedNode, TreeNode};
pub use run::{RunSummary, extract_corpus, extract_samples};
