//! Error types for loupe-index.

/// Errors that can occur while building an index snapshot.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Project tree resolution failed while collecting chunks.
    #[error("file tree error: {0}")]
    Tree(#[from] loupe_files::FileTreeError),

    /// The background build task panicked or was cancelled.
    #[error("build task failed: {0}")]
    BuildTask(String),
}

/// Result type alias using `IndexError`.
pub type Result<T> = std::result::Result<T, IndexError>;
