//! Node-type vocabulary: stable integer ids plus occurrence counts.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::Result;
use crate::format::escape_field;

/// First-sight numbering of node types.
///
/// Ids start at 0, are assigned in encounter order and never change for the
/// lifetime of a run. The persisted table covers every id emitted into the
/// corpus.
#[derive(Debug, Default)]
pub struct NodeTypeNumbering {
    ids: HashMap<String, u64>,
    /// Indexed by id: the type string and how often it was numbered.
    entries: Vec<(String, u64)>,
}

impl NodeTypeNumbering {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `node_type`, assigning the next free id on first sight.
    /// Every call counts one occurrence.
    pub fn id_of(&mut self, node_type: &str) -> u64 {
        if let Some(&id) = self.ids.get(node_type) {
            self.entries[id as usize].1 += 1;
            return id;
        }
        let id = self.entries.len() as u64;
        self.ids.insert(node_type.to_owned(), id);
        self.entries.push((node_type.to_owned(), 1));
        id
    }

    /// Number of distinct node types seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes header-less `type,id` rows ordered by descending occurrence
    /// count, ties by ascending id. The type column goes through the same
    /// escaping as path fields.
    pub fn persist_csv(&self, path: &Path) -> Result<()> {
        let file = fs::File::create(path)?;
        let mut w = BufWriter::new(file);

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].1.cmp(&self.entries[a].1).then(a.cmp(&b)));
        for id in order {
            let (node_type, _) = &self.entries[id];
            writeln!(w, "{},{}", escape_field(node_type), id)?;
        }
        w.flush()?;
        Ok(())
    }
}
