//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Create author sets in one commit so every row gets a durable id.
//! - Resolve authors by id for per-batch parent lookups.
//! - Bulk-delete authors once their books are gone.
//!
//! # Invariants
//! - `delete_all_authors` is rejected by the FK constraint while any book
//!   still references an author.

use super::{count_to_u64, ensure_connection_ready, PageQuery, RepoResult};
use crate::model::author::{Author, AuthorBookCount, AuthorId, NewAuthor};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

/// Repository interface for author persistence.
pub trait AuthorRepository {
    /// Inserts all authors in one transaction and returns them in input order.
    fn create_authors(&self, authors: &[NewAuthor]) -> RepoResult<Vec<Author>>;
    fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn count_authors(&self) -> RepoResult<u64>;
    /// Deletes every author row and returns the number removed.
    fn delete_all_authors(&self) -> RepoResult<u64>;
    /// Authors ordered by name with their book counts, one page at a time.
    fn list_authors_with_book_count(&self, page: PageQuery) -> RepoResult<Vec<AuthorBookCount>>;
}

impl<T: AuthorRepository + ?Sized> AuthorRepository for &T {
    fn create_authors(&self, authors: &[NewAuthor]) -> RepoResult<Vec<Author>> {
        (**self).create_authors(authors)
    }

    fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        (**self).find_author(id)
    }

    fn count_authors(&self) -> RepoResult<u64> {
        (**self).count_authors()
    }

    fn delete_all_authors(&self) -> RepoResult<u64> {
        (**self).delete_all_authors()
    }

    fn list_authors_with_book_count(&self, page: PageQuery) -> RepoResult<Vec<AuthorBookCount>> {
        (**self).list_authors_with_book_count(page)
    }
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "authors")?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_authors(&self, authors: &[NewAuthor]) -> RepoResult<Vec<Author>> {
        for author in authors {
            author.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut created = Vec::with_capacity(authors.len());
        {
            let mut stmt = tx.prepare_cached("INSERT INTO authors (name) VALUES (?1);")?;
            for author in authors {
                stmt.execute([author.name.as_str()])?;
                created.push(Author {
                    id: AuthorId(tx.last_insert_rowid()),
                    name: author.name.clone(),
                });
            }
        }
        tx.commit()?;

        Ok(created)
    }

    fn find_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                "SELECT id, name FROM authors WHERE id = ?1;",
                [id.0],
                |row| {
                    Ok(Author {
                        id: AuthorId(row.get("id")?),
                        name: row.get("name")?,
                    })
                },
            )
            .optional()?;
        Ok(author)
    }

    fn count_authors(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM authors;", [], |row| row.get(0))?;
        count_to_u64(count, "authors")
    }

    fn delete_all_authors(&self) -> RepoResult<u64> {
        let deleted = self.conn.execute("DELETE FROM authors;", [])?;
        Ok(deleted as u64)
    }

    fn list_authors_with_book_count(&self, page: PageQuery) -> RepoResult<Vec<AuthorBookCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, COUNT(b.id) AS book_count
             FROM authors a
             LEFT JOIN books b ON b.author_id = a.id
             GROUP BY a.id
             ORDER BY a.name ASC, a.id ASC
             LIMIT ?1 OFFSET ?2;",
        )?;
        let mut rows = stmt.query(params![i64::from(page.limit), i64::from(page.offset)])?;
        let mut authors = Vec::new();

        while let Some(row) = rows.next()? {
            let book_count: i64 = row.get("book_count")?;
            authors.push(AuthorBookCount {
                id: AuthorId(row.get("id")?),
                name: row.get("name")?,
                book_count: count_to_u64(book_count, "book_count")?,
            });
        }

        Ok(authors)
    }
}
