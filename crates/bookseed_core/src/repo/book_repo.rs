//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Commit one staged batch of books as a single durable write.
//! - Provide count and paginated reads over a large books table.
//!
//! # Invariants
//! - `insert_batch` is all-or-nothing: a failing row rolls back the batch.
//! - Nothing staged survives the call; the caller owns and drops the batch.

use super::{count_to_u64, ensure_connection_ready, PageQuery, RepoResult};
use crate::model::author::AuthorId;
use crate::model::book::{Book, BookId, NewBook};
use rusqlite::{params, Connection, Transaction, TransactionBehavior};

/// Repository interface for book persistence.
pub trait BookRepository {
    /// Inserts the batch in one transaction and returns the number of rows written.
    fn insert_batch(&self, books: &[NewBook]) -> RepoResult<u64>;
    fn count_books(&self) -> RepoResult<u64>;
    fn count_books_by_author(&self, author_id: AuthorId) -> RepoResult<u64>;
    /// Deletes every book row and returns the number removed.
    fn delete_all_books(&self) -> RepoResult<u64>;
    /// Books of one author ordered by id.
    fn list_books_by_author(&self, author_id: AuthorId, page: PageQuery) -> RepoResult<Vec<Book>>;
}

impl<T: BookRepository + ?Sized> BookRepository for &T {
    fn insert_batch(&self, books: &[NewBook]) -> RepoResult<u64> {
        (**self).insert_batch(books)
    }

    fn count_books(&self) -> RepoResult<u64> {
        (**self).count_books()
    }

    fn count_books_by_author(&self, author_id: AuthorId) -> RepoResult<u64> {
        (**self).count_books_by_author(author_id)
    }

    fn delete_all_books(&self) -> RepoResult<u64> {
        (**self).delete_all_books()
    }

    fn list_books_by_author(&self, author_id: AuthorId, page: PageQuery) -> RepoResult<Vec<Book>> {
        (**self).list_books_by_author(author_id, page)
    }
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "books")?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn insert_batch(&self, books: &[NewBook]) -> RepoResult<u64> {
        for book in books {
            book.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut inserted = 0_u64;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO books (title, description, author_id) VALUES (?1, ?2, ?3);",
            )?;
            for book in books {
                stmt.execute(params![
                    book.title.as_str(),
                    book.description.as_str(),
                    book.author_id.0,
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        count_to_u64(count, "books")
    }

    fn count_books_by_author(&self, author_id: AuthorId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE author_id = ?1;",
            [author_id.0],
            |row| row.get(0),
        )?;
        count_to_u64(count, "books")
    }

    fn delete_all_books(&self) -> RepoResult<u64> {
        let deleted = self.conn.execute("DELETE FROM books;", [])?;
        Ok(deleted as u64)
    }

    fn list_books_by_author(&self, author_id: AuthorId, page: PageQuery) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, author_id
             FROM books
             WHERE author_id = ?1
             ORDER BY id ASC
             LIMIT ?2 OFFSET ?3;",
        )?;
        let mut rows = stmt.query(params![
            author_id.0,
            i64::from(page.limit),
            i64::from(page.offset)
        ])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(Book {
                id: BookId(row.get("id")?),
                title: row.get("title")?,
                description: row.get("description")?,
                author_id: AuthorId(row.get("author_id")?),
            });
        }

        Ok(books)
    }
}
