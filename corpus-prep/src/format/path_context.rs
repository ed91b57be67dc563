//! Rendering and decoding of path-context (`.c2s`) lines.
//!
//! One line per sample: the escaped label, a space, then the rendered paths
//! space-joined. Each path is 3 comma-fields (`start,types,end`) or, with
//! token types enabled, 5 (`startType,start,types,end,endType`); the types
//! field joins the node-type sequence with pipes.

use crate::errors::{Error, Result};
use crate::export::NodeTypeNumbering;
use crate::format::escape::{NO_TYPE, escape_field, unescape_field};
use crate::model::{AstPath, TreeNode};

/// Decoded form of one rendered path. Fields hold raw (unescaped) values;
/// [`PathContextRecord::encode`] re-applies the escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContextRecord {
    pub start_token_type: Option<String>,
    pub start_token: String,
    pub node_types: Vec<String>,
    pub end_token: String,
    pub end_token_type: Option<String>,
}

impl PathContextRecord {
    /// Joins the fields into the comma/pipe-delimited wire form.
    pub fn encode(&self) -> String {
        let mut fields: Vec<String> = Vec::with_capacity(5);
        if let Some(t) = &self.start_token_type {
            fields.push(escape_field(t));
        }
        fields.push(escape_field(&self.start_token));
        let types: Vec<String> = self.node_types.iter().map(|t| escape_field(t)).collect();
        fields.push(types.join("|"));
        fields.push(escape_field(&self.end_token));
        if let Some(t) = &self.end_token_type {
            fields.push(escape_field(t));
        }
        fields.join(",")
    }

    /// Parses one wire-form path: exactly 3 fields (types disabled) or 5
    /// (types enabled); anything else is a parse error.
    pub fn decode(field_str: &str) -> Result<PathContextRecord> {
        let fields: Vec<&str> = field_str.split(',').collect();
        match fields.as_slice() {
            [start, types, end] => Ok(PathContextRecord {
                start_token_type: None,
                start_token: unescape_field(start),
                node_types: decode_types(types),
                end_token: unescape_field(end),
                end_token_type: None,
            }),
            [start_type, start, types, end, end_type] => Ok(PathContextRecord {
                start_token_type: Some(unescape_field(start_type)),
                start_token: unescape_field(start),
                node_types: decode_types(types),
                end_token: unescape_field(end),
                end_token_type: Some(unescape_field(end_type)),
            }),
            other => Err(Error::Parse(format!(
                "path has {} comma-fields, expected 3 or 5",
                other.len()
            ))),
        }
    }
}

fn decode_types(types: &str) -> Vec<String> {
    types.split('|').map(unescape_field).collect()
}

/// Renders mined paths into wire form.
#[derive(Debug, Clone, Copy)]
pub struct PathContextFormatter {
    include_token_types: bool,
}

impl PathContextFormatter {
    pub fn new(include_token_types: bool) -> Self {
        Self {
            include_token_types,
        }
    }

    /// Renders one path. With `numbering` present each node type is replaced
    /// by its stable integer id, assigned on first sight.
    ///
    /// # Errors
    /// [`Error::MalformedTree`] if either endpoint lacks a token.
    pub fn render_path<N: TreeNode>(
        &self,
        path: &AstPath<'_, N>,
        mut numbering: Option<&mut NodeTypeNumbering>,
    ) -> Result<String> {
        let start = path.start();
        let end = path.end();
        let start_token = endpoint_token(start)?;
        let end_token = endpoint_token(end)?;

        let node_types: Vec<String> = path
            .nodes()
            .map(|n| match numbering.as_deref_mut() {
                Some(table) => table.id_of(n.node_type()).to_string(),
                None => n.node_type().to_string(),
            })
            .collect();

        let record = PathContextRecord {
            start_token_type: self.endpoint_type(start),
            start_token: start_token.to_string(),
            node_types,
            end_token: end_token.to_string(),
            end_token_type: self.endpoint_type(end),
        };
        Ok(record.encode())
    }

    fn endpoint_type<N: TreeNode>(&self, node: &N) -> Option<String> {
        self.include_token_types
            .then(|| node.resolved_token_type().unwrap_or(NO_TYPE).to_string())
    }
}

fn endpoint_token<N: TreeNode>(node: &N) -> Result<&str> {
    node.token().ok_or_else(|| {
        Error::MalformedTree(format!(
            "path endpoint `{}` carries no token",
            node.node_type()
        ))
    })
}

/// One full `.c2s` line: escaped label, then the rendered paths, all
/// space-separated.
pub fn render_sample(label: &str, paths: &[String]) -> String {
    let mut line = escape_field(label);
    for path in paths {
        line.push(' ');
        line.push_str(path);
    }
    line
}

/// Inverts [`render_sample`]: the raw label and every decoded path.
pub fn decode_sample(line: &str) -> Result<(String, Vec<PathContextRecord>)> {
    let mut parts = line.split(' ');
    let label = parts.next().unwrap_or("");
    let mut records = Vec::new();
    for part in parts {
        if part.is_empty() {
            continue;
        }
        records.push(PathContextRecord::decode(part)?);
    }
    Ok((unescape_field(label), records))
}
