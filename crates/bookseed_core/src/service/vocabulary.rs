//! Word pools random records are drawn from.

use super::{SeedError, SeedResult};
use rand::seq::SliceRandom;
use rand::Rng;

const TITLE_WORDS: &[&str] = &[
    "Book", "Novel", "Novella", "Story", "Poem", "Verses", "Drama", "Comedy", "Tragedy", "Tale",
];

const DESCRIPTIONS: &[&str] = &[
    "A book description",
    "An engaging story",
    "A literary classic",
    "A gripping plot",
    "A philosophical work",
];

pub(crate) const FIRST_NAMES: &[&str] = &[
    "Alexander", "Mikhail", "Leo", "Fyodor", "Anton", "Nikolai", "Ivan", "Sergei", "Vladimir",
    "Dmitry",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Pushkin",
    "Tolstoy",
    "Dostoevsky",
    "Chekhov",
    "Gogol",
    "Turgenev",
    "Bulgakov",
    "Nabokov",
    "Solzhenitsyn",
    "Pasternak",
];

/// Title and description pools for generated books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            TITLE_WORDS.iter().map(|word| word.to_string()).collect(),
            DESCRIPTIONS.iter().map(|text| text.to_string()).collect(),
        )
    }
}

impl Vocabulary {
    pub fn new(titles: Vec<String>, descriptions: Vec<String>) -> Self {
        Self {
            titles,
            descriptions,
        }
    }

    /// Both pools must be non-empty and no title word may be blank, since
    /// every generated title must stay non-empty. Descriptions may be empty
    /// strings.
    pub fn validate(&self) -> SeedResult<()> {
        if self.titles.is_empty() {
            return Err(SeedError::invalid("title pool must not be empty"));
        }
        if self.descriptions.is_empty() {
            return Err(SeedError::invalid("description pool must not be empty"));
        }
        if self.titles.iter().any(|title| title.trim().is_empty()) {
            return Err(SeedError::invalid("title pool contains a blank entry"));
        }
        Ok(())
    }

    /// Picks a title word and a description uniformly at random.
    ///
    /// Callers validate the pools first; empty pools yield empty strings.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, &str) {
        let title = self.titles.choose(rng).map_or("", String::as_str);
        let description = self.descriptions.choose(rng).map_or("", String::as_str);
        (title, description)
    }
}

/// Builds a "First Last" author name from the built-in name pools.
pub fn random_author_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Anonymous");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Author");
    format!("{first} {last}")
}
