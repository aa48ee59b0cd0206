//! Domain model for the author/book catalog.
//!
//! # Responsibility
//! - Define the staged (`New*`) and persisted record shapes.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never constructed by callers
//!   for new rows.
//! - Every persisted book references exactly one persisted author.

pub mod author;
pub mod book;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for staged records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    EmptyAuthorName,
    EmptyBookTitle,
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthorName => write!(f, "author name must not be empty"),
            Self::EmptyBookTitle => write!(f, "book title must not be empty"),
        }
    }
}

impl Error for ModelValidationError {}
