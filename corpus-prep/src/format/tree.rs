//! Tree-structured (`.jsonl`) sample records.

use serde::{Deserialize, Serialize};

use crate::format::escape::NO_TYPE;
use crate::model::{Dataset, LabeledTree, TreeNode};

/// One node of the index-based tree representation.
///
/// `children` holds indices into the flat node list. Ids are assigned in
/// pre-order with the parent numbered before its subtree, so every child id
/// is strictly greater than its parent's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRepresentation {
    /// Concrete token text; serialized as `null` for tokenless nodes.
    #[serde(default)]
    pub token: Option<String>,
    pub node_type: String,
    /// Present exactly when token-type output was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    pub children: Vec<usize>,
}

/// One labeled sample in tree form; serializes to a single JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeRepresentation {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holdout: Option<Dataset>,
    pub tree: Vec<NodeRepresentation>,
}

/// Flattens trees into the index-based representation.
#[derive(Debug, Clone, Copy)]
pub struct TreeFormatter {
    include_token_types: bool,
}

impl TreeFormatter {
    pub fn new(include_token_types: bool) -> Self {
        Self {
            include_token_types,
        }
    }

    /// Collects the subtree of `root` into pre-order records. The walk uses
    /// an explicit stack, so tree depth is not bounded by the call stack.
    ///
    /// When token types are requested every record carries the field, with
    /// the `<NT>` placeholder standing in for unresolved nodes; otherwise
    /// the field is omitted entirely. Presence tracks the request, not data
    /// availability.
    pub fn collect_nodes<N: TreeNode>(&self, root: &N) -> Vec<NodeRepresentation> {
        let mut out = Vec::new();
        let mut stack: Vec<(&N, Option<usize>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let id = out.len();
            let token_type = self
                .include_token_types
                .then(|| node.resolved_token_type().unwrap_or(NO_TYPE).to_string());
            out.push(NodeRepresentation {
                token: node.token().map(str::to_owned),
                node_type: node.node_type().to_owned(),
                token_type,
                children: Vec::with_capacity(node.children().len()),
            });
            if let Some(parent) = parent {
                out[parent].children.push(id);
            }
            // Children are pushed reversed so the pop order stays pre-order.
            for child in node.children().iter().rev() {
                stack.push((child, Some(id)));
            }
        }
        out
    }

    /// Renders a whole labeled sample, carrying the split as `holdout`.
    pub fn collect_tree<N: TreeNode>(
        &self,
        sample: &LabeledTree<N>,
        split: Option<Dataset>,
    ) -> TreeRepresentation {
        TreeRepresentation {
            label: sample.label.clone(),
            holdout: split,
            tree: self.collect_nodes(&sample.root),
        }
    }
}
