//! The entry store: every enumerated file and its size fetch lifecycle.
//!
//! The store is owned by the thread running the event loop and is only ever mutated there.
//! Background fetches report through [Notification](crate::core::worker::Notification)s,
//! which the owner applies with [EntryStore::complete_fetch] or [EntryStore::fail_fetch].
//! That single writer is what keeps the store free of locks.
//!
//! Lifecycle of an entry:
//! ```text
//! Unfetched --begin_fetch--> Fetching --complete_fetch--> Fetched(size)
//!                                     --fail_fetch------> Failed(error)
//! ```
//! `Fetched` and `Failed` are absorbing.

use crate::core::error::FetchError;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Size fetch state of a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Unfetched,
    Fetching,
    Fetched(u64),
    Failed(FetchError),
}

impl FetchState {
    /// True for states no transition can leave.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Fetched(_) | FetchState::Failed(_))
    }
}

/// One project file, keyed by its path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: PathBuf,
    state: FetchState,
}

impl Entry {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: FetchState::Unfetched,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        match self.state {
            FetchState::Fetched(size) => Some(size),
            _ => None,
        }
    }
}

/// Per state tallies, shown in the status line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StateCounts {
    pub unfetched: usize,
    pub fetching: usize,
    pub fetched: usize,
    pub failed: usize,
}

/// Ordered collection of entries, enumeration order preserved, indexed by path.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    index: HashMap<PathBuf, usize>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with one `Unfetched` entry per path, in the given order.
    ///
    /// Duplicate paths keep their first position.
    pub fn load<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.entries.clear();
        self.index.clear();

        for path in paths {
            if self.index.contains_key(&path) {
                continue;
            }
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push(Entry::new(path));
        }
        tracing::debug!(entries = self.entries.len(), "entry store loaded");
    }

    /// Moves `path` from `Unfetched` to `Fetching`.
    ///
    /// Returns false, and changes nothing, for unknown paths and for entries that are
    /// already fetching or done. This check-then-set is what prevents duplicate fetches.
    pub fn begin_fetch(&mut self, path: &Path) -> bool {
        let Some(entry) = self.entry_mut(path) else {
            return false;
        };
        if entry.state != FetchState::Unfetched {
            return false;
        }
        entry.state = FetchState::Fetching;
        tracing::debug!(path = %path.display(), "fetch started");
        true
    }

    /// Records the size computed for `path`.
    ///
    /// Entries that already reached a terminal state are left untouched.
    pub fn complete_fetch(&mut self, path: &Path, size: u64) {
        self.finish(path, FetchState::Fetched(size));
    }

    /// Records that the size of `path` could not be computed.
    pub fn fail_fetch(&mut self, path: &Path, error: FetchError) {
        self.finish(path, FetchState::Failed(error));
    }

    fn finish(&mut self, path: &Path, state: FetchState) {
        let Some(entry) = self.entry_mut(path) else {
            tracing::warn!(path = %path.display(), "fetch result for unknown entry dropped");
            return;
        };
        if entry.state.is_terminal() {
            tracing::warn!(path = %path.display(), "fetch result for finished entry dropped");
            return;
        }
        tracing::debug!(path = %path.display(), state = ?state, "fetch finished");
        entry.state = state;
    }

    /// A copy of all entries in order, safe to hand to the view layer.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    pub fn get(&self, path: &Path) -> Option<&Entry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for entry in &self.entries {
            match entry.state {
                FetchState::Unfetched => counts.unfetched += 1,
                FetchState::Fetching => counts.fetching += 1,
                FetchState::Fetched(_) => counts.fetched += 1,
                FetchState::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }

    fn entry_mut(&mut self, path: &Path) -> Option<&mut Entry> {
        let idx = *self.index.get(path)?;
        self.entries.get_mut(idx)
    }
}
