//! Batched generation of child books for one author.
//!
//! # Responsibility
//! - Produce exactly `total` books for an author in `batch_size` chunks.
//! - Commit each chunk as one write and drop it before staging the next.
//!
//! # Invariants
//! - Only the batch being staged is held in memory; nothing generated is
//!   cached across batch boundaries.
//! - The parent author is looked up again at the start of every batch.
//! - The last batch holds `total % batch_size` books when that is non-zero.
//! - A failure stops the run; earlier batches stay committed.

use super::vocabulary::Vocabulary;
use super::{SeedError, SeedResult};
use crate::model::author::{Author, AuthorId};
use crate::model::book::NewBook;
use crate::progress::memory::{format_bytes, MemoryMonitor, MemoryProbe};
use crate::progress::tracker::ProgressTracker;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::BookRepository;
use log::{debug, error, info};
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

/// Parameters of one `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateRequest {
    pub author_id: AuthorId,
    pub total: u64,
    pub batch_size: usize,
}

/// Outcome of a completed `generate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GenerateReport {
    pub books_created: u64,
    pub batches: u64,
    pub peak_memory_bytes: u64,
}

/// Generates books for authors that already have durable ids.
pub struct BookGenerator<A, B, R, P>
where
    A: AuthorRepository,
    B: BookRepository,
    R: Rng,
    P: MemoryProbe,
{
    authors: A,
    books: B,
    rng: R,
    memory: MemoryMonitor<P>,
}

impl<A, B, R, P> BookGenerator<A, B, R, P>
where
    A: AuthorRepository,
    B: BookRepository,
    R: Rng,
    P: MemoryProbe,
{
    pub fn new(authors: A, books: B, rng: R, memory: MemoryMonitor<P>) -> Self {
        Self {
            authors,
            books,
            rng,
            memory,
        }
    }

    /// Writes `request.total` books for `request.author_id`.
    ///
    /// After each committed batch the tracker advances by the batch size and
    /// its status becomes `batch <n> | peak: <memory>`.
    ///
    /// # Errors
    /// - `InvalidParameter` when `batch_size` is zero or the vocabulary is
    ///   unusable; nothing is written.
    /// - `ParentNotFound` when the author is gone at the start of a batch.
    /// - `CommitFailure` when a batch write fails.
    pub fn generate(
        &mut self,
        request: &GenerateRequest,
        vocabulary: &Vocabulary,
        progress: &mut ProgressTracker,
    ) -> SeedResult<GenerateReport> {
        if request.batch_size == 0 {
            return Err(SeedError::invalid("batch size must be at least 1"));
        }
        vocabulary.validate()?;

        let started_at = Instant::now();
        info!(
            "event=generate module=seed status=start author_id={} total={} batch_size={}",
            request.author_id, request.total, request.batch_size
        );

        match self.run_batches(request, vocabulary, progress) {
            Ok(report) => {
                info!(
                    "event=generate module=seed status=ok author_id={} books={} batches={} peak_bytes={} duration_ms={}",
                    request.author_id,
                    report.books_created,
                    report.batches,
                    report.peak_memory_bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(report)
            }
            Err(err) => {
                error!(
                    "event=generate module=seed status=error author_id={} committed={} duration_ms={} error_code={} error={}",
                    request.author_id,
                    progress.current(),
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    fn run_batches(
        &mut self,
        request: &GenerateRequest,
        vocabulary: &Vocabulary,
        progress: &mut ProgressTracker,
    ) -> SeedResult<GenerateReport> {
        let batch_size = request.batch_size as u64;
        let mut offset = 0_u64;
        let mut batches = 0_u64;

        while offset < request.total {
            let batch_number = batches + 1;
            let author = self
                .authors
                .find_author(request.author_id)?
                .ok_or(SeedError::ParentNotFound(request.author_id))?;
            let size = batch_size.min(request.total - offset);

            let batch_started_at = Instant::now();
            {
                let batch = stage_batch(&mut self.rng, vocabulary, &author, offset, size);
                self.books
                    .insert_batch(&batch)
                    .map_err(|source| SeedError::CommitFailure {
                        author_id: request.author_id,
                        batch: batch_number,
                        source,
                    })?;
            }

            offset += size;
            batches = batch_number;
            progress.advance(size);

            let sample = self.memory.sample();
            progress.set_status(format!(
                "batch {batch_number} | peak: {}",
                format_bytes(sample.peak)
            ));
            debug!(
                "event=batch_commit module=seed status=ok author_id={} batch={} size={} memory_bytes={} duration_ms={}",
                request.author_id,
                batch_number,
                size,
                sample.current,
                batch_started_at.elapsed().as_millis()
            );
        }

        Ok(GenerateReport {
            books_created: offset,
            batches,
            peak_memory_bytes: self.memory.peak(),
        })
    }
}

/// Builds books `offset + 1 ..= offset + size`, each titled
/// `<random title word> <ordinal>`.
fn stage_batch<R: Rng + ?Sized>(
    rng: &mut R,
    vocabulary: &Vocabulary,
    author: &Author,
    offset: u64,
    size: u64,
) -> Vec<NewBook> {
    (0..size)
        .map(|index| {
            let (word, description) = vocabulary.pick(rng);
            NewBook {
                title: format!("{word} {}", offset + index + 1),
                description: description.to_string(),
                author_id: author.id,
            }
        })
        .collect()
}
