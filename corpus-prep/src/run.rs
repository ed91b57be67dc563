//! High-level orchestration: labeled trees in, split corpus files out.
//!
//! The single public entry point for dump-based extraction is
//! [`extract_corpus`]; [`extract_samples`] is the front-end-agnostic core
//! that any adapter producing [`LabeledTree`]s can drive directly.

use std::path::Path;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ExtractorConfig, OutputFormat};
use crate::errors::Error;
use crate::export::{DatasetWriter, ExtractionSummary, PathSample, SampleRecord};
use crate::format::{PathContextFormatter, TreeFormatter};
use crate::mining::{PathMiner, PathSampler};
use crate::model::{AstPath, Dataset, LabeledTree, TreeNode};
use crate::source;

/// Final report of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Labeled trees consumed from the front-end.
    pub trees_processed: usize,
    /// Path samples dropped because an endpoint carried no token.
    pub skipped_malformed: usize,
    /// Trees yielding no admissible path (tree output is unaffected).
    pub samples_without_paths: usize,
    /// Per-format, per-split statistics from the writer.
    pub writer: ExtractionSummary,
}

/// Front-end-agnostic pipeline: mines, samples, renders and stores every
/// labeled tree, then closes the writer.
///
/// Contract violations inside one tree (a path endpoint without a token)
/// skip that tree's path sample with a warning and are counted in the
/// summary; configuration and I/O problems abort the run.
pub fn extract_samples<N, I>(samples: I, cfg: &ExtractorConfig) -> crate::errors::Result<RunSummary>
where
    N: TreeNode,
    I: IntoIterator<Item = (LabeledTree<N>, Option<Dataset>)>,
{
    cfg.validate()?;

    let miner = PathMiner::new(cfg.path_length, cfg.path_width);
    let mut sampler = PathSampler::new(
        cfg.max_paths_in_train,
        cfg.max_paths_in_test,
        cfg.shuffle_seed,
    );
    let path_format = PathContextFormatter::new(cfg.include_token_types);
    let tree_format = TreeFormatter::new(cfg.include_token_types);
    let want_paths = cfg.formats.contains(&OutputFormat::PathContexts);
    let want_trees = cfg.formats.contains(&OutputFormat::Trees);

    let mut writer = DatasetWriter::open(&cfg.output_directory, &cfg.formats, cfg.nodes_to_numbers)?;

    let mut trees_processed = 0usize;
    let mut skipped_malformed = 0usize;
    let mut samples_without_paths = 0usize;

    for (tree, split) in samples {
        trees_processed += 1;

        if want_paths {
            let mined = miner.retrieve_paths(&tree.root);
            if mined.is_empty() {
                debug!("run: `{}` yields no admissible paths", tree.label);
                samples_without_paths += 1;
            } else {
                let kept = sampler.sample(mined, split);
                match render_paths(&path_format, &kept, &mut writer) {
                    Ok(paths) => {
                        let record = SampleRecord::Paths(PathSample {
                            label: tree.label.clone(),
                            paths,
                        });
                        writer.store(&record, split)?;
                    }
                    Err(Error::MalformedTree(msg)) => {
                        warn!("run: skipping path sample `{}`: {}", tree.label, msg);
                        skipped_malformed += 1;
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if want_trees {
            let record = SampleRecord::Tree(tree_format.collect_tree(&tree, split));
            writer.store(&record, split)?;
        }
    }

    Ok(RunSummary {
        trees_processed,
        skipped_malformed,
        samples_without_paths,
        writer: writer.close()?,
    })
}

fn render_paths<N: TreeNode>(
    format: &PathContextFormatter,
    paths: &[AstPath<'_, N>],
    writer: &mut DatasetWriter,
) -> crate::errors::Result<Vec<String>> {
    paths
        .iter()
        .map(|p| format.render_path(p, writer.numbering_mut()))
        .collect()
}

/// End-to-end run over dump files.
///
/// # Steps:
/// 1. **Discover** `*.jsonl` tree dumps under `input`.
/// 2. **Read** every dump tolerantly into labeled trees.
/// 3. **Extract** path/tree samples and store them per split.
#[tracing::instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn extract_corpus(input: &Path, cfg: &ExtractorConfig) -> anyhow::Result<RunSummary> {
    cfg.validate()?;

    // 1. Locate dumps
    let dumps = source::discover_dumps(input);
    if dumps.is_empty() {
        bail!("no .jsonl tree dumps found under {:?}", input);
    }
    info!(dumps = dumps.len(), "Discovered tree dumps");

    // 2. Read them all; each dump is one front-end batch
    let mut samples = Vec::new();
    for dump in &dumps {
        let read =
            source::read_dump(dump).with_context(|| format!("reading tree dump {:?}", dump))?;
        samples.extend(read.into_iter().map(|s| (s.tree, s.split)));
    }
    info!(samples = samples.len(), "Read labeled trees");

    // 3. Mine, render, store
    let summary = extract_samples(samples, cfg)?;
    info!(
        trees = summary.trees_processed,
        skipped_malformed = summary.skipped_malformed,
        without_paths = summary.samples_without_paths,
        "Extraction finished"
    );
    debug!("run: summary: {}", serde_json::to_string_pretty(&summary)?);
    Ok(summary)
}
