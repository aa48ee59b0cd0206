//! Bulk removal of all books and authors.
//!
//! # Invariants
//! - Books are deleted before authors; the reverse order would violate the
//!   `books.author_id` foreign key.
//! - When deleting books fails, authors are left untouched.

use super::SeedResult;
use crate::repo::author_repo::AuthorRepository;
use crate::repo::book_repo::BookRepository;
use log::info;
use serde::Serialize;
use std::time::Instant;

/// Row counts removed by one `clear` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClearReport {
    pub books_deleted: u64,
    pub authors_deleted: u64,
}

/// Deletes every book, then every author.
pub struct DataClearer<A: AuthorRepository, B: BookRepository> {
    authors: A,
    books: B,
}

impl<A: AuthorRepository, B: BookRepository> DataClearer<A, B> {
    pub fn new(authors: A, books: B) -> Self {
        Self { authors, books }
    }

    /// Empties both tables. Calling it on an empty store returns zero counts.
    pub fn clear(&self) -> SeedResult<ClearReport> {
        let started_at = Instant::now();
        info!("event=clear module=seed status=start");

        let books_deleted = self.books.delete_all_books()?;
        let authors_deleted = self.authors.delete_all_authors()?;

        info!(
            "event=clear module=seed status=ok books_deleted={} authors_deleted={} duration_ms={}",
            books_deleted,
            authors_deleted,
            started_at.elapsed().as_millis()
        );
        Ok(ClearReport {
            books_deleted,
            authors_deleted,
        })
    }
}
