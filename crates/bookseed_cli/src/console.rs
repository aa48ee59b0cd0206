//! Console rendering of pipeline events.

use bookseed_core::{format_bytes, Author, ClearReport, GenerateReport, ProgressTracker, SeedObserver};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};

const BAR_TEMPLATE: &str = " {pos}/{len} [{bar:40.cyan/blue}] {percent:>3}% {msg}";

/// Prints stage headings to `out` and drives one progress bar per author.
///
/// Observer callbacks cannot fail, so the first write error is kept and
/// reported by `finish`.
pub struct ConsoleObserver<W: Write> {
    out: W,
    show_progress: bool,
    bar: Option<ProgressBar>,
    write_error: Option<io::Error>,
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W, show_progress: bool) -> Self {
        Self {
            out,
            show_progress,
            bar: None,
            write_error: None,
        }
    }

    /// Clears a bar left behind by an aborted generation.
    pub fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }

    /// Returns the first write error seen, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.write_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn line(&mut self, text: &str) {
        if self.write_error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{text}") {
            self.write_error = Some(err);
        }
    }

    fn new_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░  "),
        );
        bar
    }
}

impl<W: Write> SeedObserver for ConsoleObserver<W> {
    fn cleared(&mut self, report: &ClearReport) {
        if let Err(err) = write_clear_report(&mut self.out, report) {
            self.write_error.get_or_insert(err);
        }
    }

    fn authors_seeded(&mut self, authors: &[Author]) {
        self.line("== Creating authors");
        for author in authors {
            self.line(&format!("Created author: {} (id {})", author.name, author.id));
        }
    }

    fn progress_tracker(&mut self, author: &Author, total: u64) -> ProgressTracker {
        self.line(&format!("== Creating books for {}", author.name));
        let bar = self.new_bar(total);
        self.bar = Some(bar.clone());
        ProgressTracker::with_listener(total, move |snapshot| {
            bar.set_position(snapshot.current);
            bar.set_message(snapshot.status.clone());
        })
    }

    fn generation_finished(&mut self, author: &Author, report: &GenerateReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
        self.line(&format!(
            "Created {} books for {} in {} batches (peak memory {})",
            report.books_created,
            author.name,
            report.batches,
            format_bytes(report.peak_memory_bytes)
        ));
    }
}

pub fn write_clear_report(out: &mut impl Write, report: &ClearReport) -> io::Result<()> {
    writeln!(out, "== Clearing database")?;
    writeln!(out, "Deleted books: {}", report.books_deleted)?;
    writeln!(out, "Deleted authors: {}", report.authors_deleted)
}
