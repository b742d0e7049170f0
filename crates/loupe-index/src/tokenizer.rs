//! Text normalization: raw content to index terms.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // English function words.
        "about", "after", "all", "also", "an", "and", "any", "are", "as", "at", "be", "been",
        "before", "but", "by", "can", "could", "did", "do", "does", "for", "from", "had", "has",
        "have", "how", "if", "in", "into", "is", "it", "its", "more", "most", "no", "not", "of",
        "on", "only", "or", "other", "our", "out", "over", "should", "so", "some", "such", "than",
        "that", "the", "their", "then", "there", "these", "they", "this", "to", "under", "up",
        "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "why",
        "will", "with", "would", "you", "your",
        // Source-syntax keywords; boilerplate that would dominate term counts.
        "abstract", "async", "await", "bool", "boolean", "break", "case", "catch", "char",
        "class", "const", "continue", "def", "default", "delete", "double", "elif", "else",
        "end", "enum", "export", "extends", "false", "final", "finally", "float", "fn",
        "function", "goto", "impl", "implements", "import", "include", "inline", "instanceof",
        "int", "interface", "lambda", "let", "local", "long", "match", "mod", "module", "mut",
        "namespace", "new", "nil", "none", "null", "operator", "override", "package", "pass",
        "print", "private", "protected", "pub", "public", "raise", "require", "return", "self",
        "short", "signed", "sizeof", "static", "str", "struct", "super", "switch", "template",
        "throw", "throws", "trait", "true", "try", "type", "typedef", "typeof", "undefined",
        "union", "unsigned", "use", "var", "virtual", "void", "volatile", "yield",
    ]
    .into_iter()
    .collect()
});

/// Splits text into normalized index terms.
///
/// Input is lowercased and split on any run of characters outside
/// `[a-z0-9_]`; tokens of length one and stopwords are dropped. Total over
/// arbitrary input, deterministic, order-preserving.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(is_separator)
        .filter(|token| token.len() > 1 && !STOPWORDS.contains(*token))
        .map(str::to_string)
        .collect()
}

/// Counts term occurrences in one piece of text.
#[must_use]
pub fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn is_separator(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '_')
}
