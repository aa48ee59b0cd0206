//! Book (child record) model.

use super::author::AuthorId;
use super::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Storage-assigned book identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

/// Book staged for insertion.
///
/// Carries only the parent identifier, never a borrowed `Author`, so a staged
/// batch holds no reference that outlives the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    /// May be empty.
    pub description: String,
    pub author_id: AuthorId,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.title.trim().is_empty() {
            return Err(ModelValidationError::EmptyBookTitle);
        }
        Ok(())
    }
}

/// Persisted book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: String,
    pub author_id: AuthorId,
}
