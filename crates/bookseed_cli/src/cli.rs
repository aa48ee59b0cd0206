//! Command-line arguments.

use bookseed_core::service::seed_pipeline::{
    DEFAULT_BATCH_SIZE, DEFAULT_BOOKS_PER_AUTHOR, DEFAULT_RANDOM_AUTHORS,
};
use bookseed_core::{AuthorSource, SeedPlan};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookseed", version)]
#[command(about = "Seed a book catalog database with large volumes of generated data")]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "BOOKSEED_DB", default_value = "bookseed.sqlite3")]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn, error (requires --log-dir)
    #[arg(long, global = true, requires = "log_dir")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (logging is off when omitted)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Wipe all rows, create authors, then generate books for each
    Seed(SeedArgs),
    /// Delete all books, then all authors
    Clear,
    /// Show authors with their book counts
    Stats(StatsArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Seed(_) => "seed",
            Self::Clear => "clear",
            Self::Stats(_) => "stats",
        }
    }
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Author name; repeat for several authors (overrides --random-authors)
    #[arg(long = "author", value_name = "NAME")]
    pub authors: Vec<String>,

    /// Number of randomly named authors when no --author is given
    #[arg(long, default_value_t = DEFAULT_RANDOM_AUTHORS)]
    pub random_authors: usize,

    /// Books generated per author
    #[arg(long, default_value_t = DEFAULT_BOOKS_PER_AUTHOR)]
    pub books_per_author: u64,

    /// Books committed per transaction
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Random seed for reproducible names, titles and descriptions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Print the run summary as JSON instead of progress and text
    #[arg(long)]
    pub json: bool,
}

impl SeedArgs {
    pub fn plan(&self) -> SeedPlan {
        let authors = if self.authors.is_empty() {
            AuthorSource::Random(self.random_authors)
        } else {
            AuthorSource::Named(self.authors.clone())
        };
        SeedPlan {
            authors,
            books_per_author: self.books_per_author,
            batch_size: self.batch_size,
            seed: self.seed,
            ..SeedPlan::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Authors per page
    #[arg(long, default_value_t = 50)]
    pub limit: u32,

    /// Authors to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
