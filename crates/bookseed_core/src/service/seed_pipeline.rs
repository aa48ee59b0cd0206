//! Single entry point composing clear, seed and generate.
//!
//! # Responsibility
//! - Validate the whole plan before touching storage.
//! - Run `DataClearer`, `AuthorSeeder` and `BookGenerator` in that order.
//! - Report stage transitions to a `SeedObserver` instead of printing.

use super::author_seeder::{random_author_names, AuthorSeeder};
use super::book_generator::{BookGenerator, GenerateReport, GenerateRequest};
use super::clear_service::{ClearReport, DataClearer};
use super::vocabulary::Vocabulary;
use super::{SeedError, SeedResult};
use crate::model::author::Author;
use crate::progress::memory::{MemoryMonitor, MemoryProbe, SysinfoProbe};
use crate::progress::tracker::ProgressTracker;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::BookRepository;
use log::{error, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;

pub const DEFAULT_RANDOM_AUTHORS: usize = 3;
pub const DEFAULT_BOOKS_PER_AUTHOR: u64 = 100_000;
pub const DEFAULT_BATCH_SIZE: usize = 2_000;

/// Where author names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorSource {
    /// Fixed names, in order. Duplicates allowed.
    Named(Vec<String>),
    /// `n` names drawn from the built-in first/last name pools.
    Random(usize),
}

/// Full configuration of one seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlan {
    pub authors: AuthorSource,
    pub books_per_author: u64,
    pub batch_size: usize,
    /// `Some` makes names, titles and descriptions reproducible.
    pub seed: Option<u64>,
    pub vocabulary: Vocabulary,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            authors: AuthorSource::Random(DEFAULT_RANDOM_AUTHORS),
            books_per_author: DEFAULT_BOOKS_PER_AUTHOR,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl SeedPlan {
    /// Rejects plans that would fail part-way; runs before any write.
    pub fn validate(&self) -> SeedResult<()> {
        if self.batch_size == 0 {
            return Err(SeedError::invalid("batch size must be at least 1"));
        }
        match &self.authors {
            AuthorSource::Named(names) => {
                if names.is_empty() {
                    return Err(SeedError::invalid("at least one author name is required"));
                }
                if let Some(index) = names.iter().position(|name| name.trim().is_empty()) {
                    return Err(SeedError::invalid(format!(
                        "author name at position {index} is blank"
                    )));
                }
            }
            AuthorSource::Random(0) => {
                return Err(SeedError::invalid("random author count must be at least 1"));
            }
            AuthorSource::Random(_) => {}
        }
        self.vocabulary.validate()
    }

    /// Number of books the plan will create in total.
    pub fn expected_books(&self) -> u64 {
        let authors = match &self.authors {
            AuthorSource::Named(names) => names.len(),
            AuthorSource::Random(count) => *count,
        };
        (authors as u64).saturating_mul(self.books_per_author)
    }

    fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.unwrap_or_else(rand::random))
    }
}

/// Stage callbacks for a console or other front end. All methods default to
/// doing nothing.
pub trait SeedObserver {
    fn cleared(&mut self, _report: &ClearReport) {}

    fn authors_seeded(&mut self, _authors: &[Author]) {}

    /// Supplies the tracker for one author's generation, e.g. one with a
    /// listener that drives a progress bar.
    fn progress_tracker(&mut self, _author: &Author, total: u64) -> ProgressTracker {
        ProgressTracker::new(total)
    }

    fn generation_finished(&mut self, _author: &Author, _report: &GenerateReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SeedObserver for NoopObserver {}

/// Per-author outcome within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub author: Author,
    pub report: GenerateReport,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub cleared: ClearReport,
    pub authors: Vec<AuthorSummary>,
    pub books_created: u64,
    pub peak_memory_bytes: u64,
}

/// Runs the clear -> seed authors -> generate books sequence.
pub struct SeedPipeline<A: AuthorRepository, B: BookRepository> {
    authors: A,
    books: B,
}

impl<A: AuthorRepository, B: BookRepository> SeedPipeline<A, B> {
    pub fn new(authors: A, books: B) -> Self {
        Self { authors, books }
    }

    /// Runs the plan, sampling memory from the live process.
    pub fn run(&self, plan: &SeedPlan, observer: &mut dyn SeedObserver) -> SeedResult<SeedSummary> {
        self.run_with_probe(plan, observer, SysinfoProbe::new())
    }

    /// Runs the plan with a caller-supplied memory probe.
    ///
    /// # Errors
    /// The first stage error aborts the run. Rows committed by earlier
    /// stages and batches stay in storage.
    pub fn run_with_probe<P: MemoryProbe>(
        &self,
        plan: &SeedPlan,
        observer: &mut dyn SeedObserver,
        probe: P,
    ) -> SeedResult<SeedSummary> {
        plan.validate()?;

        let started_at = Instant::now();
        info!(
            "event=seed_run module=seed status=start expected_books={} batch_size={} seeded={}",
            plan.expected_books(),
            plan.batch_size,
            plan.seed.is_some()
        );

        match self.execute(plan, observer, probe) {
            Ok(summary) => {
                info!(
                    "event=seed_run module=seed status=ok authors={} books={} peak_bytes={} duration_ms={}",
                    summary.authors.len(),
                    summary.books_created,
                    summary.peak_memory_bytes,
                    started_at.elapsed().as_millis()
                );
                Ok(summary)
            }
            Err(err) => {
                error!(
                    "event=seed_run module=seed status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    fn execute<P: MemoryProbe>(
        &self,
        plan: &SeedPlan,
        observer: &mut dyn SeedObserver,
        probe: P,
    ) -> SeedResult<SeedSummary> {
        let mut rng = plan.rng();
        let names = match &plan.authors {
            AuthorSource::Named(names) => names.clone(),
            AuthorSource::Random(count) => random_author_names(&mut rng, *count),
        };

        let cleared = DataClearer::new(&self.authors, &self.books).clear()?;
        observer.cleared(&cleared);

        let authors = AuthorSeeder::new(&self.authors).seed_authors(&names)?;
        observer.authors_seeded(&authors);

        let mut generator =
            BookGenerator::new(&self.authors, &self.books, rng, MemoryMonitor::new(probe));
        let mut summaries = Vec::with_capacity(authors.len());
        let mut books_created = 0_u64;
        let mut peak_memory_bytes = 0_u64;

        for author in authors {
            let request = GenerateRequest {
                author_id: author.id,
                total: plan.books_per_author,
                batch_size: plan.batch_size,
            };
            let mut progress = observer.progress_tracker(&author, plan.books_per_author);
            let report = generator.generate(&request, &plan.vocabulary, &mut progress)?;
            observer.generation_finished(&author, &report);

            books_created += report.books_created;
            peak_memory_bytes = peak_memory_bytes.max(report.peak_memory_bytes);
            summaries.push(AuthorSummary { author, report });
        }

        Ok(SeedSummary {
            cleared,
            authors: summaries,
            books_created,
            peak_memory_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthorSource, SeedPlan};
    use crate::service::vocabulary::Vocabulary;
    use crate::service::SeedError;

    #[test]
    fn default_plan_matches_reference_volumes() {
        let plan = SeedPlan::default();
        assert_eq!(plan.authors, AuthorSource::Random(3));
        assert_eq!(plan.books_per_author, 100_000);
        assert_eq!(plan.batch_size, 2_000);
        assert_eq!(plan.expected_books(), 300_000);
        plan.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_plans() {
        let cases = [
            SeedPlan {
                batch_size: 0,
                ..SeedPlan::default()
            },
            SeedPlan {
                authors: AuthorSource::Named(Vec::new()),
                ..SeedPlan::default()
            },
            SeedPlan {
                authors: AuthorSource::Named(vec!["A".to_string(), " ".to_string()]),
                ..SeedPlan::default()
            },
            SeedPlan {
                authors: AuthorSource::Random(0),
                ..SeedPlan::default()
            },
            SeedPlan {
                vocabulary: Vocabulary::new(Vec::new(), vec!["d".to_string()]),
                ..SeedPlan::default()
            },
        ];

        for plan in cases {
            assert!(matches!(
                plan.validate(),
                Err(SeedError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn zero_books_per_author_is_allowed() {
        let plan = SeedPlan {
            books_per_author: 0,
            ..SeedPlan::default()
        };
        plan.validate().unwrap();
        assert_eq!(plan.expected_books(), 0);
    }
}
