//! Input side of the pipeline: locating and reading labeled tree dumps.

mod jsonl;

pub use jsonl::{DumpSample, read_dump};

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Resolves the dump set for an input path.
///
/// A file is taken as-is; a directory is walked recursively for `*.jsonl`
/// files. Results are sorted so processing order is deterministic.
/// Unreadable directory entries are logged and skipped.
pub fn discover_dumps(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }

    let mut dumps = Vec::new();
    for entry in WalkDir::new(input).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("source: walk error under {:?}: {}", input, e);
                continue;
            }
        };
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "jsonl")
        {
            dumps.push(entry.into_path());
        }
    }
    dumps.sort();
    dumps
}
