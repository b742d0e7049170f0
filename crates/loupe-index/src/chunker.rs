//! Overlapping line-window chunking of file content.

use loupe_files::FileNode;

/// One indexed window of a file's lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Snapshot-unique id, `"{file_id}:{start_line}"`.
    pub id: String,
    /// Id of the owning file record.
    pub file_id: String,
    /// Resolved `/`-joined path of the owning file.
    pub file_path: String,
    /// Window text, lines joined with `\n`.
    pub content: String,
    /// First line of the window, 1-based.
    pub start_line: usize,
    /// Last line of the window, 1-based inclusive.
    pub end_line: usize,
}

/// Chunker configuration.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Lines per window (default: 20).
    pub window_lines: usize,
    /// Line step between window starts (default: 15).
    pub stride_lines: usize,
    /// Files longer than this many characters yield no chunks (default: 100000).
    pub max_file_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            window_lines: 20,
            stride_lines: 15,
            max_file_chars: 100_000,
        }
    }
}

/// Splits one file into overlapping line windows.
///
/// Empty files and files longer than `max_file_chars` characters yield no
/// chunks; oversized files are skipped whole, never truncated. Windows whose
/// text is entirely blank are dropped. Iteration stops with the first window
/// that reaches the end of the file, so a short file produces a single chunk
/// covering every line.
#[must_use]
pub fn chunk_file(file: &FileNode, file_path: &str, config: &ChunkerConfig) -> Vec<Chunk> {
    if file.content.is_empty() || file.content.chars().count() > config.max_file_chars {
        return Vec::new();
    }

    let lines: Vec<&str> = file.content.lines().collect();
    let window = config.window_lines.max(1);
    let stride = config.stride_lines.max(1);

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < lines.len() {
        let end = usize::min(start + window, lines.len());
        let slice = &lines[start..end];
        if !slice.iter().all(|line| line.trim().is_empty()) {
            chunks.push(Chunk {
                id: format!("{}:{}", file.id, start + 1),
                file_id: file.id.clone(),
                file_path: file_path.to_string(),
                content: slice.join("\n"),
                start_line: start + 1,
                end_line: end,
            });
        }
        if end >= lines.len() {
            break;
        }
        start += stride;
    }
    chunks
}
