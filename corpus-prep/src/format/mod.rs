mod escape;
mod path_context;
mod tree;

pub use escape::{NO_TYPE, escape_field, unescape_field};
pub use path_context::{
    PathContextFormatter, PathContextRecord, decode_sample, render_sample,
};
pub use tree::{NodeRepresentation, TreeFormatter, TreeRepresentation};
