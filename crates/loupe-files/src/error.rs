//! Error types for loupe-files.

/// Errors that can occur while resolving the project tree.
#[derive(Debug, thiserror::Error)]
pub enum FileTreeError {
    /// No record with the requested id exists in the snapshot.
    #[error("unknown node id: {0}")]
    UnknownId(String),

    /// A node references a parent id that is absent from the snapshot.
    #[error("node {id} references missing parent {parent_id}")]
    MissingParent {
        /// Id of the node holding the dangling reference.
        id: String,
        /// The parent id that could not be found.
        parent_id: String,
    },

    /// The parent chain of a node never reaches a root.
    #[error("parent chain of node {0} loops")]
    ParentCycle(String),
}

/// Result type alias using `FileTreeError`.
pub type Result<T> = std::result::Result<T, FileTreeError>;
