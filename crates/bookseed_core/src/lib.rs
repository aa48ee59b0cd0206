//! Core of the book catalog seeder.
//!
//! Wipes the author/book tables, seeds authors and generates large volumes
//! of books in bounded, separately committed batches.

pub mod db;
pub mod logging;
pub mod model;
pub mod progress;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::author::{Author, AuthorBookCount, AuthorId, NewAuthor};
pub use model::book::{Book, BookId, NewBook};
pub use model::ModelValidationError;
pub use progress::memory::{format_bytes, MemoryMonitor, MemoryProbe, MemorySample, SysinfoProbe};
pub use progress::tracker::{ProgressSnapshot, ProgressTracker};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::{PageQuery, RepoError, RepoResult};
pub use service::author_seeder::{random_author_names, AuthorSeeder};
pub use service::book_generator::{BookGenerator, GenerateReport, GenerateRequest};
pub use service::clear_service::{ClearReport, DataClearer};
pub use service::seed_pipeline::{
    AuthorSource, AuthorSummary, NoopObserver, SeedObserver, SeedPipeline, SeedPlan, SeedSummary,
};
pub use service::vocabulary::Vocabulary;
pub use service::{SeedError, SeedResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
