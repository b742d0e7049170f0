//! Prompt-context assembly: structure listing, ranked snippets, active file.

use std::fmt::Write;

use loupe_files::{FileNode, FileTree};

use crate::indexer::TfIdfIndex;
use crate::retriever::{RetrievalConfig, SearchResult, rank_chunks};

/// Assembles the context blob for one query.
///
/// The structure listing always leads, with or without an index. Ranked
/// snippets follow when a snapshot exists and anything matched. The active
/// file's full content closes the blob unless that file already appears
/// among the snippets, so the model always sees what the user is editing
/// without receiving it twice.
#[must_use]
pub fn assemble_context(
    index: Option<&TfIdfIndex>,
    query: &str,
    active_file_id: Option<&str>,
    files: &[FileNode],
    top_k: usize,
    config: &RetrievalConfig,
) -> String {
    let tree = FileTree::new(files);
    let mut out = String::new();
    write_structure(&mut out, &tree);

    let results = index
        .map(|index| rank_chunks(index, query, top_k, config))
        .unwrap_or_default();

    if !results.is_empty() {
        out.push('\n');
        write_snippets(&mut out, &results);
    }

    if let Some(id) = active_file_id
        && !results.iter().any(|result| result.file_id == id)
        && let Some(node) = tree.get(id)
        && node.is_file()
    {
        out.push('\n');
        write_active_file(&mut out, &tree, node);
    }

    out
}

/// Sorted `[DIR]`/`[FILE]` listing of every resolvable record.
fn write_structure(out: &mut String, tree: &FileTree<'_>) {
    let mut entries: Vec<(String, &str)> = Vec::new();
    for node in tree.nodes() {
        match tree.path_of(&node.id) {
            Ok(path) => {
                let label = if node.is_file() { "[FILE]" } else { "[DIR]" };
                entries.push((path, label));
            }
            Err(error) => {
                tracing::debug!(id = %node.id, %error, "record left out of structure listing");
            }
        }
    }
    entries.sort();

    out.push_str("<project_structure>\n");
    for (path, label) in entries {
        let _ = writeln!(out, "{label} {path}");
    }
    out.push_str("</project_structure>\n");
}

fn write_snippets(out: &mut String, results: &[SearchResult]) {
    out.push_str("<code_context>\n");
    for result in results {
        let _ = writeln!(
            out,
            "  <chunk file=\"{}\" lines=\"{}-{}\" score=\"{:.2}\">",
            result.file_path, result.start_line, result.end_line, result.score,
        );
        out.push_str(&result.snippet);
        out.push_str("\n  </chunk>\n");
    }
    out.push_str("</code_context>\n");
}

fn write_active_file(out: &mut String, tree: &FileTree<'_>, node: &FileNode) {
    let path = tree.path_of(&node.id).unwrap_or_else(|_| node.name.clone());
    let _ = writeln!(out, "<active_file path=\"{path}\">");
    out.push_str(&node.content);
    out.push_str("\n</active_file>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::ChunkerConfig;
    use crate::indexer::build_index;

    fn sample_project() -> Vec<FileNode> {
        vec![
            FileNode::directory("d-src", None, "src"),
            FileNode::file(
                "f-add",
                Some("d-src"),
                "add.ts",
                "function add(a, b) { return a + b; }",
            ),
            FileNode::file(
                "f-sub",
                Some("d-src"),
                "sub.ts",
                "function subtract(a, b) { return a - b; }",
            ),
            FileNode::file("f-readme", None, "README.md", "subtraction helpers"),
        ]
    }

    fn indexed(files: &[FileNode]) -> TfIdfIndex {
        build_index(files, &ChunkerConfig::default())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn structure_listing_sorted_by_path() {
        let files = sample_project();
        let context = assemble_context(None, "", None, &files, 5, &RetrievalConfig::default());
        let body = context
            .split_once("<project_structure>\n")
            .and_then(|(_, rest)| rest.split_once("</project_structure>"))
            .map(|(body, _)| body)
            .unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(
            lines,
            [
                "[FILE] README.md",
                "[DIR] src",
                "[FILE] src/add.ts",
                "[FILE] src/sub.ts",
            ]
        );
    }

    #[test]
    fn no_index_degrades_to_structure_only() {
        let files = sample_project();
        let context = assemble_context(
            None,
            "subtract",
            None,
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(context.contains("<project_structure>"));
        assert!(!context.contains("<code_context>"));
        assert!(!context.contains("<active_file"));
    }

    #[test]
    fn no_index_still_appends_active_file() {
        let files = sample_project();
        let context = assemble_context(
            None,
            "subtract",
            Some("f-add"),
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(!context.contains("<code_context>"));
        assert!(context.contains("<active_file path=\"src/add.ts\">"));
        assert!(context.contains("function add(a, b)"));
    }

    #[test]
    fn empty_project_keeps_structure_header() {
        let context = assemble_context(None, "query", None, &[], 5, &RetrievalConfig::default());
        assert_eq!(context, "<project_structure>\n</project_structure>\n");
    }

    #[test]
    fn snippets_rendered_for_matches() {
        let files = sample_project();
        let index = indexed(&files);
        let context = assemble_context(
            Some(&index),
            "subtract",
            None,
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(context.contains("<code_context>"));
        assert!(context.contains("<chunk file=\"src/sub.ts\" lines=\"1-1\""));
        assert!(context.contains("function subtract(a, b)"));
        assert!(context.contains("</code_context>"));
    }

    #[test]
    fn snippet_block_omitted_when_nothing_matches() {
        let files = sample_project();
        let index = indexed(&files);
        let context = assemble_context(
            Some(&index),
            "quaternion",
            None,
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(!context.contains("<code_context>"));
    }

    #[test]
    fn active_file_appended_when_absent_from_results() {
        let files = sample_project();
        let index = indexed(&files);
        let context = assemble_context(
            Some(&index),
            "subtract",
            Some("f-add"),
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(context.contains("<active_file path=\"src/add.ts\">"));
        assert!(context.contains("function add(a, b)"));
    }

    #[test]
    fn active_file_skipped_when_already_retrieved() {
        let files = sample_project();
        let index = indexed(&files);
        let context = assemble_context(
            Some(&index),
            "subtract",
            Some("f-sub"),
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(context.contains("<chunk file=\"src/sub.ts\""));
        assert!(!context.contains("<active_file"));
    }

    #[test]
    fn unknown_or_directory_active_id_ignored() {
        let files = sample_project();
        let context = assemble_context(
            None,
            "",
            Some("ghost"),
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(!context.contains("<active_file"));

        let context = assemble_context(
            None,
            "",
            Some("d-src"),
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(!context.contains("<active_file"));
    }

    #[test]
    fn unresolvable_record_left_out_of_listing() {
        let files = vec![
            FileNode::file("f-ok", None, "kept.txt", "kept"),
            FileNode::file("f-broken", Some("ghost"), "lost.txt", "lost"),
        ];
        let context = assemble_context(None, "", None, &files, 5, &RetrievalConfig::default());
        assert!(context.contains("[FILE] kept.txt"));
        assert!(!context.contains("lost.txt"));
    }

    #[test]
    fn active_file_follows_snippets_with_blank_line() {
        let files = sample_project();
        let index = indexed(&files);
        let context = assemble_context(
            Some(&index),
            "subtract",
            Some("f-add"),
            &files,
            5,
            &RetrievalConfig::default(),
        );
        assert!(context.contains("</code_context>\n\n<active_file"));
        assert!(context.contains("</project_structure>\n\n<code_context>"));
    }
}
