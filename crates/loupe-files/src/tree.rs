//! Read view over one snapshot of project records.

use std::collections::HashMap;

use crate::error::{FileTreeError, Result};
use crate::node::{FileKind, FileNode};

/// Borrowed view of a flat record list with id lookup and path resolution.
///
/// The view holds no copies of record data; it indexes the slice it was built
/// from and stays valid for that slice's lifetime.
#[derive(Debug)]
pub struct FileTree<'a> {
    nodes: &'a [FileNode],
    by_id: HashMap<&'a str, &'a FileNode>,
}

impl<'a> FileTree<'a> {
    /// Indexes a record snapshot. Later records win duplicate ids.
    #[must_use]
    pub fn new(nodes: &'a [FileNode]) -> Self {
        let by_id = nodes.iter().map(|node| (node.id.as_str(), node)).collect();
        Self { nodes, by_id }
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a FileNode> {
        self.by_id.get(id).copied()
    }

    /// Resolves the `/`-joined path of a node by walking its parent chain.
    ///
    /// Root nodes resolve to their bare name; no leading separator is added.
    ///
    /// # Errors
    ///
    /// Returns an error when the id is unknown, a parent link points at a
    /// missing record, or the parent chain loops.
    pub fn path_of(&self, id: &str) -> Result<String> {
        let mut node = self
            .get(id)
            .ok_or_else(|| FileTreeError::UnknownId(id.to_string()))?;
        let mut segments = vec![node.name.as_str()];
        let mut hops = 0usize;
        while let Some(parent_id) = node.parent_id.as_deref() {
            hops += 1;
            if hops > self.nodes.len() {
                return Err(FileTreeError::ParentCycle(id.to_string()));
            }
            node = self
                .get(parent_id)
                .ok_or_else(|| FileTreeError::MissingParent {
                    id: node.id.clone(),
                    parent_id: parent_id.to_string(),
                })?;
            segments.push(node.name.as_str());
        }
        segments.reverse();
        Ok(segments.join("/"))
    }

    /// Iterates every record in snapshot order, directories included.
    pub fn nodes(&self) -> impl Iterator<Item = &'a FileNode> {
        self.nodes.iter()
    }

    /// Iterates file records in snapshot order, skipping directories.
    pub fn files(&self) -> impl Iterator<Item = &'a FileNode> {
        self.nodes
            .iter()
            .filter(|node| node.kind == FileKind::File)
    }

    /// Number of records in the snapshot, directories included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
