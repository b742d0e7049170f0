//! Engine lifecycle: background rebuilds and atomic snapshot publication.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Instant;

use loupe_files::FileNode;

use crate::chunker::ChunkerConfig;
use crate::context::assemble_context;
use crate::error::IndexError;
use crate::indexer::{IndexStats, TfIdfIndex, build_index};
use crate::retriever::{RetrievalConfig, SearchResult, rank_chunks};

/// Engine configuration.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Chunking policy applied on every rebuild.
    pub chunker: ChunkerConfig,
    /// Ranking thresholds applied to every query.
    pub retrieval: RetrievalConfig,
}

type Snapshot = Arc<RwLock<Option<Arc<TfIdfIndex>>>>;

#[derive(Debug, Default)]
struct BuildState {
    in_flight: bool,
    pending: Option<Vec<FileNode>>,
}

/// Lexical search engine for one project session.
///
/// Owns at most one published index snapshot. Rebuilds run on blocking
/// tasks and publish by swapping the snapshot pointer, so queries read
/// whichever snapshot is current and never wait on a build. Create one
/// engine per open project and drop it when the project closes.
#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
    snapshot: Snapshot,
    build: Mutex<BuildState>,
}

impl SearchEngine {
    /// Creates an engine with no index; the first `update_index` publishes one.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            snapshot: Arc::new(RwLock::new(None)),
            build: Mutex::new(BuildState::default()),
        }
    }

    /// Rebuilds the index from a complete project file set.
    ///
    /// At most one build runs at a time. A file set arriving while a build
    /// is active is parked for the running call to pick up before it
    /// finishes, latest set winning; the parking call itself returns
    /// immediately. A parked set builds only if the running call is driven
    /// to completion: dropping that future abandons the parked set, and
    /// the next call starts from a clean slate. Build failures clear the
    /// published index and are logged, never returned.
    pub async fn update_index(&self, files: Vec<FileNode>) {
        {
            let mut state = lock_build(&self.build);
            if state.in_flight {
                state.pending = Some(files);
                return;
            }
            state.in_flight = true;
            state.pending = None;
        }

        // Resets the build slot if this future is dropped mid-drain,
        // otherwise later triggers would park forever behind a runner that
        // is gone. Whatever is parked at that point goes with it.
        let mut flag = InFlightFlag {
            build: Some(&self.build),
        };
        let mut next = files;
        loop {
            run_build(Arc::clone(&self.snapshot), self.config.chunker.clone(), next).await;
            let mut state = lock_build(&self.build);
            match state.pending.take() {
                Some(files) => next = files,
                None => {
                    state.in_flight = false;
                    flag.disarm();
                    return;
                }
            }
        }
    }

    /// Ranks indexed chunks against `query`, best first.
    ///
    /// Synchronous; returns an empty list while no index is published.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        match self.current() {
            Some(index) => rank_chunks(&index, query, limit, &self.config.retrieval),
            None => Vec::new(),
        }
    }

    /// Assembles the context blob for `query` over the given file set.
    ///
    /// Synchronous; degrades to the structure listing alone while no index
    /// is published.
    #[must_use]
    pub fn context(
        &self,
        query: &str,
        active_file_id: Option<&str>,
        files: &[FileNode],
        top_k: usize,
    ) -> String {
        let snapshot = self.current();
        assemble_context(
            snapshot.as_deref(),
            query,
            active_file_id,
            files,
            top_k,
            &self.config.retrieval,
        )
    }

    /// Summary of the published snapshot, `None` while unindexed.
    #[must_use]
    pub fn stats(&self) -> Option<IndexStats> {
        self.current().map(|index| index.stats())
    }

    fn current(&self) -> Option<Arc<TfIdfIndex>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

struct InFlightFlag<'a> {
    build: Option<&'a Mutex<BuildState>>,
}

impl InFlightFlag<'_> {
    fn disarm(&mut self) {
        self.build = None;
    }
}

impl Drop for InFlightFlag<'_> {
    fn drop(&mut self) {
        if let Some(build) = self.build {
            let mut state = lock_build(build);
            state.in_flight = false;
            state.pending = None;
        }
    }
}

/// Runs one build on the blocking pool and publishes its outcome.
///
/// Publication happens inside the blocking task, so a completed build swaps
/// the snapshot even if the awaiting caller has gone away.
async fn run_build(snapshot: Snapshot, config: ChunkerConfig, files: Vec<FileNode>) {
    let published = Arc::clone(&snapshot);
    let outcome = tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        match build_index(&files, &config) {
            Ok(Some(index)) => {
                let stats = index.stats();
                let duration_ms: u64 = started.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
                publish(&published, Some(Arc::new(index)));
                tracing::info!(
                    files = stats.files,
                    chunks = stats.chunks,
                    terms = stats.terms,
                    duration_ms,
                    "index rebuilt"
                );
            }
            Ok(None) => {
                publish(&published, None);
                tracing::info!("no indexable content, index cleared");
            }
            Err(error) => {
                publish(&published, None);
                tracing::warn!(%error, "index build failed, index cleared");
            }
        }
    })
    .await;

    if let Err(join_error) = outcome {
        let error = IndexError::BuildTask(join_error.to_string());
        publish(&snapshot, None);
        tracing::warn!(%error, "index build task aborted, index cleared");
    }
}

fn publish(snapshot: &RwLock<Option<Arc<TfIdfIndex>>>, next: Option<Arc<TfIdfIndex>>) {
    *snapshot.write().unwrap_or_else(PoisonError::into_inner) = next;
}

fn lock_build<'a>(build: &'a Mutex<BuildState>) -> MutexGuard<'a, BuildState> {
    build.lock().unwrap_or_else(PoisonError::into_inner)
}
