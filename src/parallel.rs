//! Processing strategies.
//!
//! Building an entry from a line touches nothing outside that line, so the
//! middle step of assembly can fan out over threads. Classification and
//! assembly stay sequential because ids and inheritance follow document
//! order. Both strategies produce identical output.
//!
//! - Sequential (baseline)
//! - Two-phase (classify all lines, then build entries in parallel)

use crate::document::{assemble, build_entries, classify_paragraphs, Assembly, Line};
use crate::entry::{EntryParser, LexicalEntry};
use crate::source::{Paragraph, SourceName};
use std::thread;
use std::time::Instant;
use tracing::info;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self { num_threads: cpus }
    }
}

/// Strategy 1: one pass, one thread.
pub fn process_sequential(
    paragraphs: Vec<Paragraph>,
    parser: &EntryParser,
    source: &SourceName,
) -> Assembly {
    let start_time = Instant::now();
    let classified = classify_paragraphs(paragraphs);
    let parsed = build_entries(&classified.lines, parser);
    let mut assembly = assemble(classified, parsed, parser, source);
    assembly.stats.elapsed = start_time.elapsed();
    assembly
}

/// Strategy 2: Two-Phase Processing
/// Phase 1: Classify every paragraph in document order
/// Phase 2: Build entries on `config.num_threads` threads, order preserved
/// Phase 3: Assemble sequentially
pub fn process_two_phase(
    paragraphs: Vec<Paragraph>,
    parser: &EntryParser,
    source: &SourceName,
    config: &ParallelConfig,
) -> Assembly {
    let start_time = Instant::now();

    let classified = classify_paragraphs(paragraphs);
    info!(lines = classified.lines.len(), elapsed = ?start_time.elapsed(), "phase 1: classified");

    let build_start = Instant::now();
    let parsed = build_entries_parallel(&classified.lines, parser, config.num_threads);
    info!(
        entries = parsed.len(),
        threads = config.num_threads,
        elapsed = ?build_start.elapsed(),
        "phase 2: built entries"
    );

    let mut assembly = assemble(classified, parsed, parser, source);
    assembly.stats.elapsed = start_time.elapsed();
    assembly
}

/// Build entries for `lines` using scoped threads, one chunk per thread.
pub fn build_entries_parallel(
    lines: &[Line],
    parser: &EntryParser,
    num_threads: usize,
) -> Vec<LexicalEntry> {
    if lines.is_empty() {
        return vec![];
    }

    let num_threads = num_threads.min(lines.len()).max(1);
    let chunk_size = lines.len().div_ceil(num_threads);

    thread::scope(|scope| {
        let handles: Vec<_> = lines
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || build_entries(chunk, parser)))
            .collect();

        // Collect results preserving order
        let mut all_results = Vec::with_capacity(lines.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk_results) => all_results.extend(chunk_results),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        all_results
    })
}
