//! Lazy directory walker.
//!
//! [`DirWalker`] discovers directories breadth-first and yields candidate
//! folders one at a time. Each call reads as few directories as it needs to
//! produce the next candidate; nothing about the tree is kept beyond the
//! queue of directories still to visit and the listing of the one being
//! scanned.
//!
//! Within a directory, yield order follows predicate order, not filesystem
//! order. A child named after any predicate's target folder is never queued
//! for descent, whether or not it is yielded or later deleted.

use std::collections::{BTreeSet, VecDeque};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::error::SweepError;
use super::patterns::Predicate;

#[derive(Debug, Clone)]
struct Entry {
    name: OsString,
    is_dir: bool,
}

/// Single-use, single-pass walker over a project tree.
#[derive(Debug)]
pub struct DirWalker {
    root: PathBuf,
    predicates: Vec<Predicate>,
    ignore: BTreeSet<String>,
    pending: VecDeque<PathBuf>,
    current_dir: PathBuf,
    entries: Vec<Entry>,
    cursor: usize,
    satisfied: Vec<bool>,
    finished: bool,
}

impl DirWalker {
    pub fn new<I, S>(root: impl Into<PathBuf>, predicates: Vec<Predicate>, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = root.into();
        let satisfied = vec![false; predicates.len()];

        Self {
            pending: VecDeque::from([root.clone()]),
            root,
            predicates,
            ignore: ignore.into_iter().map(Into::into).collect(),
            current_dir: PathBuf::new(),
            entries: Vec::new(),
            cursor: 0,
            satisfied,
            finished: false,
        }
    }

    /// Returns the next candidate folder, or `None` once the walk is over.
    ///
    /// A read error ends the walk: the error is returned once and every later
    /// call returns `Ok(None)`.
    pub fn next_candidate(&mut self) -> Result<Option<PathBuf>, SweepError> {
        if self.finished {
            return Ok(None);
        }

        loop {
            if self.entries.is_empty() {
                match self.load_next_dir() {
                    Ok(true) => {}
                    Ok(false) => {
                        debug!(root = %self.root.display(), "walk finished");
                        self.finish();
                        return Ok(None);
                    }
                    Err(e) => {
                        self.finish();
                        return Err(e);
                    }
                }
            }

            if let Some(candidate) = self.take_match() {
                debug!(path = %candidate.display(), "candidate");
                return Ok(Some(candidate));
            }

            // Nothing left to yield here, move on to the next pending directory
            self.entries.clear();
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory whose entries are being scanned, empty before the first load.
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
        self.pending.clear();
        self.entries.clear();
    }

    /// Pops pending directories until one has a non-empty filtered listing.
    /// Returns false when the queue runs dry.
    fn load_next_dir(&mut self) -> Result<bool, SweepError> {
        while let Some(dir) = self.pending.pop_front() {
            let entries = self.read_filtered(&dir)?;
            if entries.is_empty() {
                trace!(dir = %dir.display(), "empty after filtering, skipped");
                continue;
            }

            self.current_dir = dir;
            self.entries = entries;
            self.cursor = 0;

            for (flag, predicate) in self.satisfied.iter_mut().zip(&self.predicates) {
                *flag = self
                    .entries
                    .iter()
                    .any(|e| e.name.to_str().is_some_and(|n| predicate.trigger.matches(n)));
            }

            let descend: Vec<PathBuf> = self
                .entries
                .iter()
                .filter(|e| e.is_dir)
                .filter(|e| {
                    let target = is_target_folder(&self.predicates, &e.name);
                    if target {
                        trace!(name = ?e.name, "target folder, not descending");
                    }
                    !target
                })
                .map(|e| self.current_dir.join(&e.name))
                .collect();
            self.pending.extend(descend);

            debug!(
                dir = %self.current_dir.display(),
                entries = self.entries.len(),
                pending = self.pending.len(),
                "loaded directory"
            );
            return Ok(true);
        }

        Ok(false)
    }

    /// Reads the immediate children of `dir`, dropping ignored names.
    /// Entries are sorted by name so the walk order does not depend on the filesystem.
    fn read_filtered(&self, dir: &Path) -> Result<Vec<Entry>, SweepError> {
        let read_err = |source: io::Error| SweepError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let name = entry.file_name();

            if self.is_ignored(&name) {
                trace!(dir = %dir.display(), name = ?name, "ignored");
                continue;
            }

            let is_dir = entry.file_type().map_err(read_err)?.is_dir();
            entries.push(Entry { name, is_dir });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn is_ignored(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|n| self.ignore.contains(n))
    }

    /// Finds the first satisfied predicate at or after the cursor whose
    /// target folder is present, and consumes it. Any entry with the target
    /// name counts, including symlinks and plain files.
    fn take_match(&mut self) -> Option<PathBuf> {
        for i in self.cursor..self.predicates.len() {
            if !self.satisfied[i] {
                continue;
            }

            let folder = OsStr::new(&self.predicates[i].folder);
            if self.entries.iter().any(|e| e.name.as_os_str() == folder) {
                self.cursor = i + 1;
                self.satisfied[i] = false;
                return Some(self.current_dir.join(folder));
            }
        }

        None
    }
}

fn is_target_folder(predicates: &[Predicate], name: &OsStr) -> bool {
    predicates.iter().any(|p| OsStr::new(&p.folder) == name)
}

impl Iterator for DirWalker {
    type Item = Result<PathBuf, SweepError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_candidate().transpose()
    }
}

impl FusedIterator for DirWalker {}
