//! Generic tree model consumed by the extraction pipeline.
//!
//! The pipeline is front-end agnostic: any parser that can materialize an
//! owned tree plugs in by implementing [`TreeNode`]. [`ParsedNode`] is the
//! owned implementation used by the dump reader and by tests.

/// Read access to one node of a labeled AST.
///
/// Children are owned by their parent, so a tree is a plain recursive value
/// that mining and rendering walk by reference.
pub trait TreeNode: Sized {
    /// Syntactic category, e.g. `METHOD` or `IDENTIFIER`.
    fn node_type(&self) -> &str;

    /// Concrete token text, for leaves that carry one.
    fn token(&self) -> Option<&str>;

    /// Resolved type of the token, when the front-end provides one.
    fn resolved_token_type(&self) -> Option<&str>;

    /// Direct children in source order.
    fn children(&self) -> &[Self];

    fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Total number of nodes in the subtree rooted here.
    fn node_count(&self) -> usize {
        1 + self.children().iter().map(Self::node_count).sum::<usize>()
    }
}

/// Owned tree node, rebuilt from a dump or built directly in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNode {
    pub node_type: String,
    pub token: Option<String>,
    pub token_type: Option<String>,
    pub children: Vec<ParsedNode>,
}

impl ParsedNode {
    /// Inner node without a token of its own.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            token: None,
            token_type: None,
            children: Vec::new(),
        }
    }

    /// Leaf node carrying a concrete token.
    pub fn leaf(node_type: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            token: Some(token.into()),
            token_type: None,
            children: Vec::new(),
        }
    }

    /// Attaches a resolved token type.
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = Some(token_type.into());
        self
    }

    /// Appends a child, returning `self` for chained construction.
    pub fn with_child(mut self, child: ParsedNode) -> Self {
        self.children.push(child);
        self
    }
}

impl TreeNode for ParsedNode {
    fn node_type(&self) -> &str {
        &self.node_type
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn resolved_token_type(&self) -> Option<&str> {
        self.token_type.as_deref()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// A single training sample: one tree plus the label a model should predict.
#[derive(Debug, Clone)]
pub struct LabeledTree<N> {
    pub root: N,
    pub label: String,
}

impl<N> LabeledTree<N> {
    pub fn new(root: N, label: impl Into<String>) -> Self {
        Self {
            root,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_includes_every_descendant() {
        let tree = ParsedNode::new("ROOT")
            .with_child(ParsedNode::leaf("A", "a"))
            .with_child(ParsedNode::new("B").with_child(ParsedNode::leaf("C", "c")));
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn leaf_checks_follow_children() {
        let leaf = ParsedNode::leaf("ID", "x");
        assert!(leaf.is_leaf());
        let inner = ParsedNode::new("BLOCK").with_child(leaf);
        assert!(!inner.is_leaf());
    }

    #[test]
    fn accessors_expose_optional_fields() {
        let node = ParsedNode::leaf("ID", "x").with_token_type("int");
        assert_eq!(node.token(), Some("x"));
        assert_eq!(node.resolved_token_type(), Some("int"));
        assert_eq!(ParsedNode::new("BLOCK").token(), None);
    }
}
