//! Per-session counters reported when a sweep ends.

use std::fmt;

use super::size::format_size;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    candidates: u64,
    deleted: u64,
    skipped: u64,
    bytes: u64,
    dry_run: bool,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// In a dry run nothing is removed, so the summary talks about what
    /// would have been deleted instead.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn record_candidate(&mut self) {
        self.candidates += 1;
    }

    /// `bytes` is the estimate shown in the prompt, not a measured figure.
    pub fn record_deleted(&mut self, bytes: u64) {
        self.deleted += 1;
        self.bytes += bytes;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn candidates(&self) -> u64 {
        self.candidates
    }

    pub fn deleted(&self) -> u64 {
        self.deleted
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (deleted, freed) = if self.dry_run {
            ("would be deleted", "reclaimable")
        } else {
            ("deleted", "freed")
        };
        write!(
            f,
            "{} candidates, {} {}, {} skipped (~{} {})",
            self.candidates,
            self.deleted,
            deleted,
            self.skipped,
            format_size(self.bytes),
            freed
        )
    }
}
