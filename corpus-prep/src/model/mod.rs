mod dataset;
mod node;
mod path;

pub use dataset::Dataset;
pub use node::{LabeledTree, ParsedNode, TreeNode};
pub use path::AstPath;
