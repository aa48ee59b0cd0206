//! Seeding pipeline stages and their orchestration.
//!
//! # Responsibility
//! - Clear existing rows, seed authors, generate books in bounded batches.
//! - Keep every stage generic over repository traits so each can be tested
//!   alone against an in-memory database or a double.
//!
//! # Invariants
//! - Stages run strictly one after another; each starts only after the
//!   previous one's commit returned.
//! - Every error aborts the enclosing stage; nothing is retried.

pub mod author_seeder;
pub mod book_generator;
pub mod clear_service;
pub mod seed_pipeline;
pub mod vocabulary;

use crate::model::author::AuthorId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SeedResult<T> = Result<T, SeedError>;

/// Fatal outcomes of a seeding stage.
#[derive(Debug)]
pub enum SeedError {
    /// Rejected input; raised before any storage work.
    InvalidParameter(String),
    /// The parent author no longer resolves when a batch starts.
    ParentNotFound(AuthorId),
    /// A batch write failed. Batches committed before it stay in storage.
    CommitFailure {
        author_id: AuthorId,
        batch: u64,
        source: RepoError,
    },
    /// Any other storage failure (clearing, seeding authors, lookups).
    Storage(RepoError),
}

impl SeedError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "invalid_parameter",
            Self::ParentNotFound(_) => "parent_not_found",
            Self::CommitFailure { .. } => "commit_failure",
            Self::Storage(_) => "storage_failure",
        }
    }
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(message) => write!(f, "invalid parameter: {message}"),
            Self::ParentNotFound(id) => write!(f, "author {id} no longer exists"),
            Self::CommitFailure {
                author_id,
                batch,
                source,
            } => write!(
                f,
                "failed to commit batch {batch} for author {author_id}: {source}"
            ),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CommitFailure { source, .. } => Some(source),
            Self::Storage(err) => Some(err),
            Self::InvalidParameter(_) | Self::ParentNotFound(_) => None,
        }
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}
