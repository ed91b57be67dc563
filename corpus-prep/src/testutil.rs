//! Shared fixtures for unit tests.

use crate::model::{LabeledTree, ParsedNode};

/// 18-node tree of one empty method inside a class, labeled `emptyMethod`.
/// Ten leaves carry tokens; no token types are resolved.
pub(crate) fn empty_method_tree() -> LabeledTree<ParsedNode> {
    let method = ParsedNode::new("METHOD")
        .with_child(
            ParsedNode::new("MODIFIER_LIST").with_child(ParsedNode::leaf("MODIFIER", "public")),
        )
        .with_child(
            ParsedNode::new("TYPE_REFERENCE")
                .with_child(ParsedNode::leaf("PRIMITIVE_TYPE", "void")),
        )
        .with_child(ParsedNode::leaf("IDENTIFIER", "emptyMethod"))
        .with_child(
            ParsedNode::new("PARAMETER_LIST")
                .with_child(ParsedNode::leaf("LPAREN", "("))
                .with_child(ParsedNode::leaf("RPAREN", ")")),
        )
        .with_child(
            ParsedNode::new("CODE_BLOCK")
                .with_child(ParsedNode::leaf("LBRACE", "{"))
                .with_child(ParsedNode::leaf("RBRACE", "}")),
        );

    let root = ParsedNode::new("FILE").with_child(
        ParsedNode::new("CLASS")
            .with_child(ParsedNode::leaf("IDENTIFIER", "Sample"))
            .with_child(
                ParsedNode::new("CLASS_BODY")
                    .with_child(ParsedNode::leaf("LBRACE", "{"))
                    .with_child(method)
                    .with_child(ParsedNode::leaf("RBRACE", "}")),
            ),
    );

    LabeledTree::new(root, "emptyMethod")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TreeNode;

    fn leaf_count(node: &ParsedNode) -> usize {
        if node.is_leaf() {
            1
        } else {
            node.children.iter().map(leaf_count).sum()
        }
    }

    #[test]
    fn fixture_has_the_documented_shape() {
        let tree = empty_method_tree();
        assert_eq!(tree.label, "emptyMethod");
        assert_eq!(tree.root.node_count(), 18);
        assert_eq!(leaf_count(&tree.root), 10);
    }
}
