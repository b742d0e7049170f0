//! Cosine-similarity ranking over an index snapshot.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::indexer::{TfIdfIndex, normalize, weigh_terms};
use crate::tokenizer::term_frequencies;

/// Results returned per search unless the caller asks for more.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Retrieval configuration.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Results scoring at or below this are dropped (default: 0.05).
    pub min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { min_score: 0.05 }
    }
}

/// One ranked chunk, shaped for the host boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Id of the matched chunk.
    pub chunk_id: String,
    /// Id of the file owning the chunk.
    pub file_id: String,
    /// Resolved `/`-joined path of that file.
    pub file_path: String,
    /// Cosine similarity against the query, in `(min_score, 1.0]`.
    pub score: f32,
    /// Raw chunk text.
    pub snippet: String,
    /// First line of the chunk, 1-based.
    pub start_line: usize,
    /// Last line of the chunk, 1-based inclusive.
    pub end_line: usize,
}

/// Ranks index chunks against a query, best first.
///
/// Query weights reuse the snapshot's IDF table, so terms outside the
/// indexed vocabulary contribute nothing. The sort is stable with ties kept
/// in corpus order, scores at or below `min_score` are dropped, and at most
/// `limit` results survive.
#[must_use]
pub fn rank_chunks(
    index: &TfIdfIndex,
    query: &str,
    limit: usize,
    config: &RetrievalConfig,
) -> Vec<SearchResult> {
    let counts = term_frequencies(query);
    let mut query_vector = weigh_terms(&counts, &index.idf);
    normalize(&mut query_vector);
    if query_vector.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f32)> = index
        .vectors
        .iter()
        .enumerate()
        .map(|(position, vector)| (position, cosine_similarity(&query_vector, vector)))
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .filter(|(_, score)| *score > config.min_score)
        .take(limit)
        .map(|(position, score)| {
            let chunk = &index.chunks[position];
            SearchResult {
                chunk_id: chunk.id.clone(),
                file_id: chunk.file_id.clone(),
                file_path: chunk.file_path.clone(),
                score,
                snippet: chunk.content.clone(),
                start_line: chunk.start_line,
                end_line: chunk.end_line,
            }
        })
        .collect()
}

/// Dot product of two unit-magnitude sparse vectors.
///
/// Iterates the smaller side and accumulates in sorted term order, so equal
/// inputs yield bit-identical scores run over run.
#[must_use]
pub fn cosine_similarity(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut entries: Vec<(&str, f32)> = small.iter().map(|(t, w)| (t.as_str(), *w)).collect();
    entries.sort_unstable_by_key(|(term, _)| *term);
    entries
        .into_iter()
        .filter_map(|(term, weight)| large.get(term).map(|other| other * weight))
        .sum()
}
