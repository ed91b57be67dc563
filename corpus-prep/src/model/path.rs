//! Mined AST path between two leaves.

use crate::model::TreeNode;

/// One path through a tree: up from a start leaf to the lowest common
/// ancestor, then down to an end leaf.
///
/// Holds references into the source tree, so a path never outlives the tree
/// it was mined from.
#[derive(Debug)]
pub struct AstPath<'t, N> {
    /// Start leaf up to the LCA, exclusive. The first element is the start leaf.
    pub upward: Vec<&'t N>,
    /// The lowest common ancestor of the two endpoints.
    pub top: &'t N,
    /// LCA down to the end leaf, exclusive. The last element is the end leaf.
    pub downward: Vec<&'t N>,
}

impl<'t, N: TreeNode> AstPath<'t, N> {
    /// Start endpoint; the LCA itself when the upward leg is empty.
    pub fn start(&self) -> &'t N {
        self.upward.first().copied().unwrap_or(self.top)
    }

    /// End endpoint; the LCA itself when the downward leg is empty.
    pub fn end(&self) -> &'t N {
        self.downward.last().copied().unwrap_or(self.top)
    }

    /// Nodes in path order: upward leg, LCA, downward leg.
    pub fn nodes(&self) -> impl Iterator<Item = &'t N> + '_ {
        self.upward
            .iter()
            .copied()
            .chain(std::iter::once(self.top))
            .chain(self.downward.iter().copied())
    }

    /// Number of nodes on the path.
    pub fn node_count(&self) -> usize {
        self.upward.len() + 1 + self.downward.len()
    }

    /// Sum of the two branch lengths below the LCA; always `node_count() - 1`.
    pub fn width(&self) -> usize {
        self.upward.len() + self.downward.len()
    }
}
