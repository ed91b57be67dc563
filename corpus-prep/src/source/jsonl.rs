//! Labeled tree dumps: JSON Lines where every line is a
//! [`TreeRepresentation`].
//!
//! Reading inverts the tree formatter exactly: a dump produced by
//! [`TreeFormatter`](crate::format::TreeFormatter) rebuilds into
//! structurally identical trees.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{Error, Result};
use crate::format::{NodeRepresentation, TreeRepresentation};
use crate::model::{Dataset, LabeledTree, ParsedNode};

/// One sample read back from a dump.
#[derive(Debug, Clone)]
pub struct DumpSample {
    pub tree: LabeledTree<ParsedNode>,
    pub split: Option<Dataset>,
}

/// Reads a dump tolerantly: malformed lines are logged and skipped, I/O
/// errors abort.
pub fn read_dump(path: &Path) -> Result<Vec<DumpSample>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line, i + 1) {
            Ok(sample) => out.push(sample),
            Err(e) => {
                warn!("source: {:?}: skipping line: {}", path, e);
                skipped += 1;
            }
        }
    }
    debug!(
        "source: {:?}: {} samples read, {} lines skipped",
        path,
        out.len(),
        skipped
    );
    Ok(out)
}

fn parse_line(line: &str, line_no: usize) -> Result<DumpSample> {
    let rep: TreeRepresentation = serde_json::from_str(line)
        .map_err(|e| Error::Parse(format!("line {} parse error: {}", line_no, e)))?;
    let root = rebuild_tree(rep.tree, line_no)?;
    Ok(DumpSample {
        tree: LabeledTree::new(root, rep.label),
        split: rep.holdout,
    })
}

/// Deepest tree a dump line may carry. Deeper lines are rejected like any
/// other malformed line; the bound keeps recursive consumers of the rebuilt
/// tree (drop included) well inside the stack.
const MAX_TREE_DEPTH: usize = 4_096;

/// Rebuilds the owned tree from index-based children.
///
/// Entry 0 is the root. A child id must be strictly greater than its parent
/// id and in range, each node may be claimed by one parent only, and the
/// tree may be at most [`MAX_TREE_DEPTH`] deep; anything else rejects the
/// line. Nodes no parent references are tolerated and dropped.
fn rebuild_tree(nodes: Vec<NodeRepresentation>, line_no: usize) -> Result<ParsedNode> {
    if nodes.is_empty() {
        return Err(Error::Parse(format!("line {}: empty node list", line_no)));
    }

    // Reference and depth check up front, before any node is built.
    let len = nodes.len();
    let mut depth = vec![0usize; len];
    let mut deepest = 0usize;
    for (id, rep) in nodes.iter().enumerate() {
        for &child_id in &rep.children {
            if child_id <= id || child_id >= len {
                return Err(Error::Parse(format!(
                    "line {}: child id {} of node {} out of range or not after its parent",
                    line_no, child_id, id
                )));
            }
            depth[child_id] = depth[id] + 1;
            deepest = deepest.max(depth[child_id]);
        }
    }
    if deepest > MAX_TREE_DEPTH {
        return Err(Error::Parse(format!(
            "line {}: tree depth {} exceeds the supported {}",
            line_no, deepest, MAX_TREE_DEPTH
        )));
    }

    // Children always come after their parent, so a reverse id sweep has
    // every child built before its parent claims it. No recursion.
    let mut built: Vec<Option<ParsedNode>> = Vec::with_capacity(len);
    built.resize_with(len, || None);
    for (id, rep) in nodes.into_iter().enumerate().rev() {
        let mut node = ParsedNode {
            node_type: rep.node_type,
            token: rep.token,
            token_type: rep.token_type,
            children: Vec::with_capacity(rep.children.len()),
        };
        for child_id in rep.children {
            match built[child_id].take() {
                Some(child) => node.children.push(child),
                None => {
                    return Err(Error::Parse(format!(
                        "line {}: node {} claimed twice",
                        line_no, child_id
                    )));
                }
            }
        }
        if id == 0 {
            return Ok(node);
        }
        built[id] = Some(node);
    }

    // The sweep always reaches id 0 and returns there.
    Err(Error::InvalidState("tree rebuild lost its root"))
}
