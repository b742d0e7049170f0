use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use loupe_files::FileNode;
use loupe_index::chunker::ChunkerConfig;
use loupe_index::indexer::build_index;
use loupe_index::retriever::{DEFAULT_SEARCH_LIMIT, RetrievalConfig, rank_chunks};

const WORDS: [&str; 16] = [
    "request", "response", "buffer", "socket", "parser", "handler", "timeout", "payload",
    "header", "router", "session", "metrics", "decode", "encode", "retry", "checksum",
];

fn generate_file(id: usize, lines: usize) -> FileNode {
    let mut content = String::new();
    for line in 0..lines {
        let verb = WORDS[(id + line) % WORDS.len()];
        let noun = WORDS[(id * 7 + line * 3) % WORDS.len()];
        content.push_str(&format!("let {verb}_{line} = {noun}_queue.pop();\n"));
    }
    FileNode::file(format!("f{id}"), None, format!("mod_{id}.rs"), content)
}

fn generate_project(files: usize, lines_per_file: usize) -> Vec<FileNode> {
    (0..files)
        .map(|id| generate_file(id, lines_per_file))
        .collect()
}

fn index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    // Typical project sizes (files at ~60 lines each)
    for files in [10, 50, 200].iter() {
        let project = generate_project(*files, 60);
        group.throughput(Throughput::Elements(*files as u64));
        group.bench_with_input(BenchmarkId::new("files", files), &project, |b, project| {
            b.iter(|| build_index(black_box(project), &ChunkerConfig::default()).unwrap());
        });
    }

    group.finish();
}

fn single_large_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunking_scale");

    // Chunk count grows linearly with line count at stride 15
    for lines in [200, 1_000, 5_000].iter() {
        let project = vec![generate_file(0, *lines)];
        group.throughput(Throughput::Elements(*lines as u64));
        group.bench_with_input(BenchmarkId::new("lines", lines), &project, |b, project| {
            b.iter(|| build_index(black_box(project), &ChunkerConfig::default()).unwrap());
        });
    }

    group.finish();
}

fn search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let project = generate_project(200, 60);
    let index = build_index(&project, &ChunkerConfig::default())
        .unwrap()
        .unwrap();
    let config = RetrievalConfig::default();
    group.throughput(Throughput::Elements(index.chunks.len() as u64));

    for (name, query) in [
        ("single_term", "checksum"),
        ("multi_term", "decode payload checksum handler"),
        ("vocabulary_miss", "quaternion"),
    ] {
        group.bench_with_input(BenchmarkId::new(name, index.chunks.len()), query, |b, query| {
            b.iter(|| rank_chunks(black_box(&index), query, DEFAULT_SEARCH_LIMIT, &config));
        });
    }

    group.finish();
}

criterion_group!(benches, index_build, single_large_file, search);
criterion_main!(benches);
