//! Creation of the parent author set.

use super::vocabulary::random_author_name;
use super::{SeedError, SeedResult};
use crate::model::author::{Author, NewAuthor};
use crate::repo::author_repo::AuthorRepository;
use log::info;
use rand::Rng;

/// Commits a set of authors in one round trip.
pub struct AuthorSeeder<A: AuthorRepository> {
    authors: A,
}

impl<A: AuthorRepository> AuthorSeeder<A> {
    pub fn new(authors: A) -> Self {
        Self { authors }
    }

    /// Stages one author per name and commits them together.
    ///
    /// Duplicate names are allowed; the storage-assigned id tells authors
    /// apart. Names are trimmed. Returns authors in input order, each with a
    /// durable id.
    ///
    /// # Errors
    /// - `InvalidParameter` for an empty list or a blank name, before any
    ///   write.
    /// - `Storage` when the commit fails.
    pub fn seed_authors(&self, names: &[String]) -> SeedResult<Vec<Author>> {
        if names.is_empty() {
            return Err(SeedError::invalid("at least one author name is required"));
        }

        let staged = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(SeedError::invalid(format!(
                        "author name at position {index} is blank"
                    )));
                }
                Ok(NewAuthor::new(trimmed))
            })
            .collect::<SeedResult<Vec<_>>>()?;

        let created = self.authors.create_authors(&staged)?;
        for author in &created {
            info!(
                "event=author_seeded module=seed status=ok author_id={}",
                author.id
            );
        }
        Ok(created)
    }
}

/// Draws `count` random "First Last" names. Repeats are possible.
pub fn random_author_names<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count).map(|_| random_author_name(rng)).collect()
}
