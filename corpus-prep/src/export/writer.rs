//! Split-routed corpus sinks.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::errors::{Error, Result};
use crate::export::summary::{ExtractionSummary, FormatSummary, SplitCounts};
use crate::export::vocab::NodeTypeNumbering;
use crate::format::{TreeRepresentation, render_sample};
use crate::model::Dataset;

/// Fixed name of the persisted node-type vocabulary inside the output
/// directory.
pub const VOCAB_FILE: &str = "node_types.csv";

/// A sample ready to be appended to the corpus.
#[derive(Debug, Clone)]
pub enum SampleRecord {
    /// Rendered path-context lines for one labeled tree.
    Paths(PathSample),
    /// Index-based tree form of one labeled tree.
    Tree(TreeRepresentation),
}

/// Raw label plus its rendered path strings.
#[derive(Debug, Clone)]
pub struct PathSample {
    pub label: String,
    pub paths: Vec<String>,
}

struct CorpusSink {
    format: OutputFormat,
    streams: [BufWriter<fs::File>; 3],
    stats: [SplitCounts; 3],
}

/// Append-only writer for one extraction run.
///
/// One file per (enabled format, split) is opened eagerly; an empty split
/// still produces its file. Routing state lives in fixed arrays indexed by
/// [`Dataset::index`]. `&mut self` on [`DatasetWriter::store`] keeps writes
/// in call order.
pub struct DatasetWriter {
    out_dir: PathBuf,
    sinks: Vec<CorpusSink>,
    numbering: Option<NodeTypeNumbering>,
}

impl DatasetWriter {
    /// Creates the output directory and opens every split file fresh.
    pub fn open(out_dir: &Path, formats: &[OutputFormat], numbered: bool) -> Result<Self> {
        fs::create_dir_all(out_dir)?;

        let mut sinks = Vec::with_capacity(formats.len());
        for format in formats {
            let open_split = |split: Dataset| -> Result<BufWriter<fs::File>> {
                let name = format!("{}.{}.{}", format.file_stem(), split, format.extension());
                let file = fs::File::create(out_dir.join(name))?;
                Ok(BufWriter::new(file))
            };
            sinks.push(CorpusSink {
                format: *format,
                streams: [
                    open_split(Dataset::Train)?,
                    open_split(Dataset::Val)?,
                    open_split(Dataset::Test)?,
                ],
                stats: [SplitCounts::default(); 3],
            });
        }
        info!(
            "writer: opened {} split files under {:?}",
            sinks.len() * Dataset::ALL.len(),
            out_dir
        );

        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            sinks,
            numbering: numbered.then(NodeTypeNumbering::new),
        })
    }

    /// Node-type numbering table, when enabled at `open`. Formatters borrow
    /// it while rendering so the ids in the corpus and in the persisted
    /// table come from the same assignments.
    pub fn numbering_mut(&mut self) -> Option<&mut NodeTypeNumbering> {
        self.numbering.as_mut()
    }

    /// Appends one sample to the record's format file for `split`.
    ///
    /// `None` routes to the train bucket. Counts one sample plus its units
    /// (paths or nodes) for the split statistics.
    pub fn store(&mut self, record: &SampleRecord, split: Option<Dataset>) -> Result<()> {
        let idx = split.unwrap_or(Dataset::Train).index();
        let format = match record {
            SampleRecord::Paths(_) => OutputFormat::PathContexts,
            SampleRecord::Tree(_) => OutputFormat::Trees,
        };
        let sink = self
            .sinks
            .iter_mut()
            .find(|s| s.format == format)
            .ok_or(Error::InvalidState("no sink open for this sample format"))?;

        let units = match record {
            SampleRecord::Paths(sample) => {
                let line = render_sample(&sample.label, &sample.paths);
                sink.streams[idx].write_all(line.as_bytes())?;
                sink.streams[idx].write_all(b"\n")?;
                sample.paths.len() as u64
            }
            SampleRecord::Tree(rep) => {
                serde_json::to_writer(&mut sink.streams[idx], rep)?;
                sink.streams[idx].write_all(b"\n")?;
                rep.tree.len() as u64
            }
        };
        sink.stats[idx].samples += 1;
        sink.stats[idx].units += units;
        Ok(())
    }

    /// Flushes every stream, persists the vocabulary table when numbering
    /// is enabled, and reports per-split statistics.
    ///
    /// Dropping a writer without closing still flushes buffered data, but
    /// produces no vocabulary file and no summary.
    pub fn close(mut self) -> Result<ExtractionSummary> {
        let mut formats = Vec::with_capacity(self.sinks.len());
        for sink in &mut self.sinks {
            let mut splits = BTreeMap::new();
            for split in Dataset::ALL {
                let idx = split.index();
                sink.streams[idx].flush()?;
                let counts = sink.stats[idx].finalized();
                info!(
                    "writer: {}.{}: {} samples, {} units",
                    sink.format, split, counts.samples, counts.units
                );
                splits.insert(split.name().to_string(), counts);
            }
            formats.push(FormatSummary {
                format: sink.format.to_string(),
                splits,
            });
        }

        let vocabulary_size = match &self.numbering {
            Some(numbering) => {
                numbering.persist_csv(&self.out_dir.join(VOCAB_FILE))?;
                debug!(
                    "writer: persisted {} node types to {}",
                    numbering.len(),
                    VOCAB_FILE
                );
                Some(numbering.len())
            }
            None => None,
        };

        Ok(ExtractionSummary::new(formats, vocabulary_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TreeFormatter;
    use crate::model::LabeledTree;
    use crate::testutil::empty_method_tree;
    use std::fs::read_to_string;

    fn path_record(label: &str, n: usize) -> SampleRecord {
        SampleRecord::Paths(PathSample {
            label: label.to_string(),
            paths: (0..n).map(|i| format!("a{i},X|Y,b{i}")).collect(),
        })
    }

    #[test]
    fn open_creates_the_full_split_triple_per_format() {
        let dir = tempfile::tempdir().unwrap();
        let writer = DatasetWriter::open(
            dir.path(),
            &[OutputFormat::PathContexts, OutputFormat::Trees],
            false,
        )
        .unwrap();
        drop(writer);

        for name in [
            "path_contexts.train.c2s",
            "path_contexts.val.c2s",
            "path_contexts.test.c2s",
            "trees.train.jsonl",
            "trees.val.jsonl",
            "trees.test.jsonl",
        ] {
            assert!(dir.path().join(name).is_file(), "missing {name}");
        }
    }

    #[test]
    fn samples_append_in_store_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            DatasetWriter::open(dir.path(), &[OutputFormat::PathContexts], false).unwrap();

        writer.store(&path_record("first", 1), None).unwrap();
        writer
            .store(&path_record("second", 2), Some(Dataset::Train))
            .unwrap();
        writer
            .store(&path_record("evaluated", 1), Some(Dataset::Val))
            .unwrap();
        let summary = writer.close().unwrap();

        let train = read_to_string(dir.path().join("path_contexts.train.c2s")).unwrap();
        assert_eq!(
            train.lines().collect::<Vec<_>>(),
            vec!["first a0,X|Y,b0", "second a0,X|Y,b0 a1,X|Y,b1"]
        );
        let val = read_to_string(dir.path().join("path_contexts.val.c2s")).unwrap();
        assert_eq!(val.lines().collect::<Vec<_>>(), vec!["evaluated a0,X|Y,b0"]);

        let train_counts = summary.split_counts("path_contexts", "train").unwrap();
        assert_eq!(train_counts.samples, 2);
        assert_eq!(train_counts.units, 3);
        assert_eq!(train_counts.mean_units, 1.5);
        let test_counts = summary.split_counts("path_contexts", "test").unwrap();
        assert_eq!(test_counts.samples, 0);
    }

    #[test]
    fn tree_records_serialize_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = DatasetWriter::open(dir.path(), &[OutputFormat::Trees], false).unwrap();

        let rep = TreeFormatter::new(false).collect_tree(&empty_method_tree(), None);
        writer.store(&SampleRecord::Tree(rep.clone()), None).unwrap();
        let summary = writer.close().unwrap();

        let written = read_to_string(dir.path().join("trees.train.jsonl")).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 1);
        let back: TreeRepresentation = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(back, rep);
        assert_eq!(summary.split_counts("trees", "train").unwrap().units, 18);
    }

    #[test]
    fn storing_into_a_missing_sink_is_invalid_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            DatasetWriter::open(dir.path(), &[OutputFormat::PathContexts], false).unwrap();

        let rep = TreeFormatter::new(false)
            .collect_tree(&LabeledTree::new(crate::model::ParsedNode::new("X"), "x"), None);
        let err = writer.store(&SampleRecord::Tree(rep), None).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn close_persists_the_vocabulary_when_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer =
            DatasetWriter::open(dir.path(), &[OutputFormat::PathContexts], true).unwrap();

        let table = writer.numbering_mut().unwrap();
        table.id_of("METHOD");
        table.id_of("METHOD");
        table.id_of("IDENTIFIER");
        let summary = writer.close().unwrap();

        assert_eq!(summary.vocabulary_size, Some(2));
        let csv = read_to_string(dir.path().join(VOCAB_FILE)).unwrap();
        assert_eq!(csv, "METHOD,0\nIDENTIFIER,1\n");
    }

    #[test]
    fn no_vocabulary_file_without_numbering() {
        let dir = tempfile::tempdir().unwrap();
        let writer =
            DatasetWriter::open(dir.path(), &[OutputFormat::PathContexts], false).unwrap();
        let summary = writer.close().unwrap();

        assert_eq!(summary.vocabulary_size, None);
        assert!(!dir.path().join(VOCAB_FILE).exists());
    }
}
