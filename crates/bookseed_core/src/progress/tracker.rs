//! Counter-against-total progress state with an attached status line.
//!
//! # Invariants
//! - `current` never exceeds `total`.
//! - The status string is overwritten on each update; no history is kept.

/// Point-in-time view of a tracker, handed to listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub current: u64,
    pub total: u64,
    pub percent: u8,
    pub status: String,
}

/// Tracks how many records of a known total have been produced.
pub struct ProgressTracker {
    current: u64,
    total: u64,
    status: String,
    listener: Option<Box<dyn FnMut(&ProgressSnapshot)>>,
}

impl ProgressTracker {
    /// Creates a tracker at zero with no listener.
    pub fn new(total: u64) -> Self {
        Self {
            current: 0,
            total,
            status: String::new(),
            listener: None,
        }
    }

    /// Creates a tracker whose listener runs after every update.
    pub fn with_listener<F>(total: u64, listener: F) -> Self
    where
        F: FnMut(&ProgressSnapshot) + 'static,
    {
        Self {
            listener: Some(Box::new(listener)),
            ..Self::new(total)
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Moves the counter forward by `n`, clamped to `total`.
    pub fn advance(&mut self, n: u64) {
        self.current = self.current.saturating_add(n).min(self.total);
        self.notify();
    }

    /// `round(100 * current / total)`; an empty total counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let ratio = self.current as f64 / self.total as f64;
        (ratio * 100.0).round() as u8
    }

    /// Replaces the status line.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
        self.notify();
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.total
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current: self.current,
            total: self.total,
            percent: self.percent(),
            status: self.status.clone(),
        }
    }

    fn notify(&mut self) {
        if self.listener.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(listener) = self.listener.as_mut() {
            listener(&snapshot);
        }
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("current", &self.current)
            .field("total", &self.total)
            .field("status", &self.status)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
