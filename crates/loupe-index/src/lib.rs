//! In-process lexical search over a project file tree.
//!
//! Source files are split into overlapping line windows, weighted with
//! TF-IDF, and ranked by cosine similarity. A [`engine::SearchEngine`]
//! owns the index for one project session: rebuilds run on blocking tasks
//! and publish atomically, queries stay synchronous and read whichever
//! snapshot is current.

pub mod chunker;
pub mod context;
pub mod engine;
pub mod error;
pub mod indexer;
pub mod retriever;
pub(crate) mod tokenizer;

pub use error::{IndexError, Result};
