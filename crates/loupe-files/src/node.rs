//! Project store records.

use serde::{Deserialize, Serialize};

/// Kind of a project tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Leaf node carrying text content.
    File,
    /// Grouping node; contributes to paths only.
    Directory,
}

/// One record from the host project store.
///
/// Records arrive as a flat list; hierarchy is encoded through `parent_id`
/// links. Field names on the wire follow the host's JSON casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Stable identifier, unique within one snapshot.
    pub id: String,
    /// Link to the containing directory; `None` for roots.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Whether this record is a file or a directory.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Base name, without any path separators.
    pub name: String,
    /// Full text content; empty for directories.
    #[serde(default)]
    pub content: String,
}

impl FileNode {
    /// Creates a file record.
    #[must_use]
    pub fn file(
        id: impl Into<String>,
        parent_id: Option<&str>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            kind: FileKind::File,
            name: name.into(),
            content: content.into(),
        }
    }

    /// Creates a directory record.
    #[must_use]
    pub fn directory(
        id: impl Into<String>,
        parent_id: Option<&str>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            kind: FileKind::Directory,
            name: name.into(),
            content: String::new(),
        }
    }

    /// Returns `true` for file records.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}
