//! Bounded AST path mining.
//!
//! Paths connect two leaves through their lowest common ancestor. The tree
//! is flattened once into an index arena (parents, depths, leaf list); each
//! leaf pair is then resolved with a depth-indexed parent walk that aborts
//! as soon as the accumulated distance exceeds the configured bounds.

mod sampling;

pub use sampling::PathSampler;

use tracing::debug;

use crate::model::{AstPath, TreeNode};

/// Extracts every leaf-to-leaf path within the configured bounds.
#[derive(Debug, Clone, Copy)]
pub struct PathMiner {
    max_length: usize,
    max_width: usize,
}

impl PathMiner {
    /// `max_length` bounds a path's node count, `max_width` the sum of the
    /// two branch lengths below the common ancestor.
    pub fn new(max_length: usize, max_width: usize) -> Self {
        Self {
            max_length,
            max_width,
        }
    }

    /// Mines all admissible paths of `root`, in deterministic pre-order
    /// pair order. Trees with fewer than two leaves yield nothing.
    pub fn retrieve_paths<'t, N: TreeNode>(&self, root: &'t N) -> Vec<AstPath<'t, N>> {
        let flat = FlatTree::build(root);
        // Both bounds cap the same walk distance: width directly, length as
        // node count = distance + 1.
        let limit = self.max_width.min(self.max_length.saturating_sub(1));

        let mut paths = Vec::new();
        for i in 0..flat.leaves.len() {
            for j in (i + 1)..flat.leaves.len() {
                let (a, b) = (flat.leaves[i], flat.leaves[j]);
                if flat.depth[a].abs_diff(flat.depth[b]) > limit {
                    continue;
                }
                if let Some(lca) = flat.lca_within(a, b, limit) {
                    paths.push(flat.path_through(a, lca, b));
                }
            }
        }
        debug!(
            "miner: {} leaves, {} paths within length {} / width {}",
            flat.leaves.len(),
            paths.len(),
            self.max_length,
            self.max_width
        );
        paths
    }
}

/// Pre-order index arena over one tree.
struct FlatTree<'t, N> {
    nodes: Vec<&'t N>,
    parent: Vec<Option<usize>>,
    depth: Vec<usize>,
    leaves: Vec<usize>,
}

impl<'t, N: TreeNode> FlatTree<'t, N> {
    fn build(root: &'t N) -> Self {
        let mut flat = FlatTree {
            nodes: Vec::new(),
            parent: Vec::new(),
            depth: Vec::new(),
            leaves: Vec::new(),
        };
        let mut stack: Vec<(&'t N, Option<usize>, usize)> = vec![(root, None, 0)];
        while let Some((node, parent, depth)) = stack.pop() {
            let id = flat.nodes.len();
            flat.nodes.push(node);
            flat.parent.push(parent);
            flat.depth.push(depth);
            if node.is_leaf() {
                flat.leaves.push(id);
            }
            // Children are pushed reversed so the pop order stays pre-order.
            for child in node.children().iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }
        flat
    }

    /// Lowest common ancestor of `a` and `b`, or `None` once the combined
    /// walk distance exceeds `limit`.
    fn lca_within(&self, a: usize, b: usize, limit: usize) -> Option<usize> {
        let (mut x, mut y) = (a, b);
        let mut dist = 0usize;
        while self.depth[x] > self.depth[y] {
            x = self.parent[x]?;
            dist += 1;
            if dist > limit {
                return None;
            }
        }
        while self.depth[y] > self.depth[x] {
            y = self.parent[y]?;
            dist += 1;
            if dist > limit {
                return None;
            }
        }
        while x != y {
            x = self.parent[x]?;
            y = self.parent[y]?;
            dist += 2;
            if dist > limit {
                return None;
            }
        }
        Some(x)
    }

    fn path_through(&self, start: usize, lca: usize, end: usize) -> AstPath<'t, N> {
        let upward = self.climb(start, lca);
        let mut downward = self.climb(end, lca);
        downward.reverse();
        AstPath {
            upward,
            top: self.nodes[lca],
            downward,
        }
    }

    /// Nodes from `from` up to `to`, exclusive of `to`.
    fn climb(&self, mut from: usize, to: usize) -> Vec<&'t N> {
        let mut leg = Vec::new();
        while from != to {
            leg.push(self.nodes[from]);
            match self.parent[from] {
                Some(p) => from = p,
                None => break,
            }
        }
        leg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParsedNode;

    fn star(leaves: &[&str]) -> ParsedNode {
        let mut root = ParsedNode::new("ROOT");
        for name in leaves {
            root = root.with_child(ParsedNode::leaf("LEAF", *name));
        }
        root
    }

    fn rendered_types(path: &AstPath<'_, ParsedNode>) -> Vec<String> {
        path.nodes().map(|n| n.node_type.clone()).collect()
    }

    #[test]
    fn star_tree_yields_every_leaf_pair() {
        let tree = star(&["a", "b", "c"]);
        let paths = PathMiner::new(9, 8).retrieve_paths(&tree);
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert_eq!(path.node_count(), 3);
            assert_eq!(path.width(), 2);
            assert_eq!(rendered_types(path), vec!["LEAF", "ROOT", "LEAF"]);
        }
        let pairs: Vec<(&str, &str)> = paths
            .iter()
            .map(|p| {
                (
                    p.start().token.as_deref().unwrap(),
                    p.end().token.as_deref().unwrap(),
                )
            })
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn fewer_than_two_leaves_yield_nothing() {
        let single = ParsedNode::leaf("LEAF", "only");
        assert!(PathMiner::new(9, 8).retrieve_paths(&single).is_empty());

        let chain = ParsedNode::new("ROOT")
            .with_child(ParsedNode::new("MID").with_child(ParsedNode::leaf("LEAF", "deep")));
        assert!(PathMiner::new(9, 8).retrieve_paths(&chain).is_empty());
    }

    #[test]
    fn length_bound_drops_long_paths() {
        // a sits two levels down, b two levels down another branch:
        // path = a, X, ROOT, Y, b -> 5 nodes, width 4.
        let tree = ParsedNode::new("ROOT")
            .with_child(ParsedNode::new("X").with_child(ParsedNode::leaf("LEAF", "a")))
            .with_child(ParsedNode::new("Y").with_child(ParsedNode::leaf("LEAF", "b")));

        assert_eq!(PathMiner::new(5, 8).retrieve_paths(&tree).len(), 1);
        assert!(PathMiner::new(4, 8).retrieve_paths(&tree).is_empty());
    }

    #[test]
    fn width_bound_drops_wide_paths() {
        let tree = ParsedNode::new("ROOT")
            .with_child(ParsedNode::new("X").with_child(ParsedNode::leaf("LEAF", "a")))
            .with_child(ParsedNode::new("Y").with_child(ParsedNode::leaf("LEAF", "b")));

        assert_eq!(PathMiner::new(9, 4).retrieve_paths(&tree).len(), 1);
        assert!(PathMiner::new(9, 3).retrieve_paths(&tree).is_empty());
    }

    #[test]
    fn unbalanced_depths_are_pruned_without_walking() {
        let mut deep = ParsedNode::leaf("LEAF", "deep");
        for i in 0..6 {
            deep = ParsedNode::new(format!("WRAP{i}")).with_child(deep);
        }
        let tree = ParsedNode::new("ROOT")
            .with_child(ParsedNode::leaf("LEAF", "shallow"))
            .with_child(deep);

        // shallow at depth 1, deep at depth 7: distance 8 > width 4.
        assert!(PathMiner::new(20, 4).retrieve_paths(&tree).is_empty());
        assert_eq!(PathMiner::new(20, 8).retrieve_paths(&tree).len(), 1);
    }

    #[test]
    fn path_legs_follow_the_branch_structure() {
        let tree = ParsedNode::new("ROOT")
            .with_child(ParsedNode::new("LEFT").with_child(ParsedNode::leaf("A", "a")))
            .with_child(ParsedNode::new("RIGHT").with_child(ParsedNode::leaf("B", "b")));
        let paths = PathMiner::new(9, 8).retrieve_paths(&tree);
        assert_eq!(paths.len(), 1);
        assert_eq!(
            rendered_types(&paths[0]),
            vec!["A", "LEFT", "ROOT", "RIGHT", "B"]
        );
    }

    #[test]
    fn candidate_order_is_deterministic() {
        let tree = star(&["a", "b", "c", "d", "e"]);
        let miner = PathMiner::new(9, 8);
        let first: Vec<String> = miner
            .retrieve_paths(&tree)
            .iter()
            .flat_map(rendered_types)
            .collect();
        let second: Vec<String> = miner
            .retrieve_paths(&tree)
            .iter()
            .flat_map(rendered_types)
            .collect();
        assert_eq!(first, second);
    }
}
