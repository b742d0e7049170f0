//! TF-IDF index construction over chunked project files.

use std::collections::{HashMap, HashSet};

use loupe_files::{FileNode, FileTree};
use serde::Serialize;

use crate::chunker::{Chunk, ChunkerConfig, chunk_file};
use crate::error::Result;
use crate::tokenizer::term_frequencies;

/// One immutable build of the lexical index.
///
/// Every field is computed in a single pass over the chunk corpus and never
/// mutated afterwards; queries share a snapshot through an `Arc` while the
/// next build runs against its own.
#[derive(Debug)]
pub struct TfIdfIndex {
    /// Chunks in corpus order: file order, then line order.
    pub chunks: Vec<Chunk>,
    /// Every term observed at build time.
    pub vocabulary: HashSet<String>,
    /// Smoothed inverse document frequency per vocabulary term.
    pub idf: HashMap<String, f32>,
    /// Unit-magnitude sparse vector per chunk, parallel to `chunks`.
    pub vectors: Vec<HashMap<String, f32>>,
}

impl TfIdfIndex {
    /// Snapshot summary for logs and status surfaces.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let files: HashSet<&str> = self.chunks.iter().map(|c| c.file_id.as_str()).collect();
        IndexStats {
            files: files.len(),
            chunks: self.chunks.len(),
            terms: self.vocabulary.len(),
        }
    }
}

/// Summary of one index snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Files that contributed at least one chunk.
    pub files: usize,
    /// Chunks in the snapshot.
    pub chunks: usize,
    /// Distinct vocabulary terms.
    pub terms: usize,
}

/// Builds a complete index snapshot from one project file set.
///
/// Chunks every eligible file, computes document frequencies once, weighs
/// each chunk with `tf * idf`, and normalizes the result to unit magnitude.
/// IDF uses `ln((N + 1) / (df + 1)) + 1`, which stays strictly positive even
/// for terms present in every chunk. Returns `Ok(None)` when no file yields
/// a chunk, leaving the caller without an index rather than with an empty
/// one.
///
/// # Errors
///
/// Returns an error when a file's path cannot be resolved through the
/// project tree.
pub fn build_index(files: &[FileNode], config: &ChunkerConfig) -> Result<Option<TfIdfIndex>> {
    let tree = FileTree::new(files);
    let mut chunks = Vec::new();
    for file in tree.files() {
        let path = tree.path_of(&file.id)?;
        chunks.extend(chunk_file(file, &path, config));
    }
    if chunks.is_empty() {
        return Ok(None);
    }

    let term_counts: Vec<HashMap<String, usize>> = chunks
        .iter()
        .map(|chunk| term_frequencies(&chunk.content))
        .collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for counts in &term_counts {
        for term in counts.keys() {
            *document_frequency.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    #[expect(clippy::cast_precision_loss)]
    let total = chunks.len() as f32;
    let idf: HashMap<String, f32> = document_frequency
        .iter()
        .map(|(term, df)| {
            #[expect(clippy::cast_precision_loss)]
            let df = *df as f32;
            ((*term).to_string(), ((total + 1.0) / (df + 1.0)).ln() + 1.0)
        })
        .collect();

    let vectors = term_counts
        .iter()
        .map(|counts| {
            let mut vector = weigh_terms(counts, &idf);
            normalize(&mut vector);
            vector
        })
        .collect();

    let vocabulary = idf.keys().cloned().collect();

    Ok(Some(TfIdfIndex {
        chunks,
        vocabulary,
        idf,
        vectors,
    }))
}

/// Term weights for one bag of counts: `tf * idf`, unnormalized.
///
/// Terms absent from the table get no weight, which silently ignores query
/// terms never seen at build time.
pub(crate) fn weigh_terms(
    counts: &HashMap<String, usize>,
    idf: &HashMap<String, f32>,
) -> HashMap<String, f32> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return HashMap::new();
    }
    #[expect(clippy::cast_precision_loss)]
    let total = total as f32;
    counts
        .iter()
        .filter_map(|(term, count)| {
            idf.get(term).map(|weight| {
                #[expect(clippy::cast_precision_loss)]
                let tf = *count as f32 / total;
                (term.clone(), tf * weight)
            })
        })
        .collect()
}

/// Scales a sparse vector to unit L2 magnitude in place.
///
/// The magnitude accumulates over terms in sorted order, keeping rebuild
/// output bit-identical regardless of hash iteration order. The zero vector
/// is left untouched.
pub(crate) fn normalize(vector: &mut HashMap<String, f32>) {
    let mut entries: Vec<(&str, f32)> = vector.iter().map(|(t, w)| (t.as_str(), *w)).collect();
    entries.sort_unstable_by_key(|(term, _)| *term);
    let magnitude = entries
        .iter()
        .map(|(_, weight)| weight * weight)
        .sum::<f32>()
        .sqrt();
    if magnitude > 0.0 {
        for weight in vector.values_mut() {
            *weight /= magnitude;
        }
    }
}
