//! Typed boundary to the host project file store.
//!
//! The host owns file content and hierarchy; this crate defines the record
//! shape exchanged with it and a read view that resolves `/`-joined paths by
//! walking parent links. Records arrive as a flat list per snapshot, so the
//! view is rebuilt cheaply whenever the host hands over a new one.

pub mod error;
pub mod node;
pub mod tree;

pub use error::{FileTreeError, Result};
pub use node::{FileKind, FileNode};
pub use tree::FileTree;
