//! `bookseed` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, open the database, run one command.
//! - Render pipeline progress on the console; the core never prints.

mod cli;
mod console;

use anyhow::{Context, Result};
use bookseed_core::db::open_db;
use bookseed_core::{
    default_log_level, init_logging, AuthorRepository, BookRepository, DataClearer, NoopObserver,
    PageQuery, SeedPipeline, SeedSummary, SqliteAuthorRepository, SqliteBookRepository,
};
use clap::Parser;
use cli::{Cli, Command, SeedArgs, StatsArgs};
use console::{write_clear_report, ConsoleObserver};
use log::info;
use rusqlite::Connection;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(&cli, &mut std::io::stdout().lock());
    ExitCode::from(finish(result, &mut std::io::stderr().lock()))
}

/// Prints a failure as `error: <chain>` and maps the outcome to an exit status.
fn finish(result: Result<()>, err_out: &mut impl Write) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            // Nothing left to report to if stderr itself is gone.
            let _ = writeln!(err_out, "error: {err:#}");
            1
        }
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    if let Some(log_dir) = &cli.log_dir {
        start_logging(cli.log_level.as_deref(), log_dir)?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let repos = Repos::new(&conn)?;

    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );
    match &cli.command {
        Command::Seed(args) => seed(&repos, args, out),
        Command::Clear => clear(&repos, out),
        Command::Stats(args) => stats(&repos, args, out),
    }
}

/// Repositories sharing the command's connection.
struct Repos<'conn> {
    authors: SqliteAuthorRepository<'conn>,
    books: SqliteBookRepository<'conn>,
}

impl<'conn> Repos<'conn> {
    fn new(conn: &'conn Connection) -> Result<Self> {
        Ok(Self {
            authors: SqliteAuthorRepository::try_new(conn)?,
            books: SqliteBookRepository::try_new(conn)?,
        })
    }
}

fn start_logging(level: Option<&str>, log_dir: &Path) -> Result<()> {
    let log_dir = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to resolve current directory")?
            .join(log_dir)
    };
    init_logging(level.unwrap_or(default_log_level()), &log_dir)
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}

fn seed<W: Write>(repos: &Repos<'_>, args: &SeedArgs, out: &mut W) -> Result<()> {
    let plan = args.plan();
    let pipeline = SeedPipeline::new(&repos.authors, &repos.books);

    if args.json {
        let summary = pipeline
            .run(&plan, &mut NoopObserver)
            .context("seeding failed")?;
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    let mut observer = ConsoleObserver::new(&mut *out, !args.no_progress);
    let summary = match pipeline.run(&plan, &mut observer) {
        Ok(summary) => summary,
        Err(err) => {
            observer.abandon();
            return Err(err).context("seeding failed");
        }
    };
    observer.finish()?;
    write_done(out, &summary)
}

fn write_done<W: Write>(out: &mut W, summary: &SeedSummary) -> Result<()> {
    writeln!(
        out,
        "Done: created {} authors and {} books",
        summary.authors.len(),
        summary.books_created
    )?;
    Ok(())
}

fn clear<W: Write>(repos: &Repos<'_>, out: &mut W) -> Result<()> {
    let report = DataClearer::new(&repos.authors, &repos.books)
        .clear()
        .context("clearing failed")?;
    write_clear_report(out, &report)?;
    writeln!(out, "Database cleared")?;
    Ok(())
}

fn stats<W: Write>(repos: &Repos<'_>, args: &StatsArgs, out: &mut W) -> Result<()> {
    let page = PageQuery {
        limit: args.limit,
        offset: args.offset,
    };
    let rows = repos.authors.list_authors_with_book_count(page)?;
    let total_authors = repos.authors.count_authors()?;
    let total_books = repos.books.count_books()?;

    if args.json {
        let report = serde_json::json!({
            "authors": rows,
            "total_authors": total_authors,
            "total_books": total_books,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    for row in &rows {
        writeln!(out, "{:>8}  {:<32} {:>10}", row.id.0, row.name, row.book_count)?;
    }
    writeln!(out, "Authors: {total_authors}  Books: {total_books}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{finish, run};
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::Path;

    fn run_command(db: &Path, args: &[&str]) -> (anyhow::Result<()>, String) {
        let db = db.to_str().unwrap();
        let argv = ["bookseed", "--db", db].into_iter().chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn seed_args() -> Vec<&'static str> {
        vec![
            "seed",
            "--author",
            "A",
            "--author",
            "B",
            "--books-per-author",
            "5",
            "--batch-size",
            "2",
            "--no-progress",
        ]
    }

    #[test]
    fn seed_stats_and_clear_against_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("catalog.db");

        let (result, output) = run_command(&db, &seed_args());
        result.unwrap();
        assert!(output.contains("Deleted books: 0"));
        assert!(output.contains("Created author: A"));
        assert!(output.contains("Created author: B"));
        assert!(output.contains("Created 5 books for A in 3 batches"));
        assert!(output.contains("Done: created 2 authors and 10 books"));

        let (result, output) = run_command(&db, &["stats", "--json"]);
        result.unwrap();
        let stats: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(stats["total_authors"], 2);
        assert_eq!(stats["total_books"], 10);
        assert_eq!(stats["authors"][0]["name"], "A");
        assert_eq!(stats["authors"][0]["book_count"], 5);

        let (result, output) = run_command(&db, &["clear"]);
        result.unwrap();
        assert!(output.contains("Deleted books: 10"));
        assert!(output.contains("Deleted authors: 2"));

        let (result, output) = run_command(&db, &["stats"]);
        result.unwrap();
        assert!(output.contains("Authors: 0  Books: 0"));
    }

    #[test]
    fn seed_json_prints_summary() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("catalog.db");
        let mut args = seed_args();
        args.push("--json");

        let (result, output) = run_command(&db, &args);
        result.unwrap();
        let summary: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(summary["books_created"], 10);
        assert_eq!(summary["authors"][1]["author"]["name"], "B");
        assert_eq!(summary["authors"][1]["report"]["batches"], 3);
        assert_eq!(summary["cleared"]["books_deleted"], 0);
    }

    #[test]
    fn invalid_seed_fails_with_error_chain_and_status_one() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("catalog.db");

        let (result, _) = run_command(&db, &["seed", "--batch-size", "0", "--no-progress"]);
        let mut err_out = Vec::new();
        let status = finish(result, &mut err_out);

        assert_eq!(status, 1);
        let message = String::from_utf8(err_out).unwrap();
        assert!(message.starts_with("error: seeding failed: invalid parameter"));
        assert!(message.contains("batch size must be at least 1"));
    }

    #[test]
    fn blank_author_is_rejected_before_clearing() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("catalog.db");
        run_command(&db, &seed_args()).0.unwrap();

        let (result, output) =
            run_command(&db, &["seed", "--author", " ", "--no-progress"]);

        assert!(result.is_err());
        assert!(!output.contains("Deleted books"));
        let (_, stats) = run_command(&db, &["stats"]);
        assert!(stats.contains("Authors: 2  Books: 10"));
    }

    #[test]
    fn success_maps_to_status_zero() {
        let mut err_out = Vec::new();
        assert_eq!(finish(Ok(()), &mut err_out), 0);
        assert!(err_out.is_empty());
    }
}
