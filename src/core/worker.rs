//! Background size fetches and the notification protocol of filesum.
//!
//! Every message the event loop reacts to is a [Notification] on one crossbeam channel:
//! decoded terminal input, redraw requests from the synchronizer, and results of background
//! fetches. The loop drains that channel on the owning thread, which is the only thread
//! allowed to touch the [EntryStore].
//!
//! [Fetcher] spawns one short lived thread per accepted fetch request. The thread stats a
//! single file and posts exactly one [Notification::FetchCompleted]. It never sees the store.
//!
//! # Caution:
//! This module is the protocol boundary between the background threads and app state.
//! Adding or changing a [Notification] variant requires matching changes in
//! `AppState::handle_notification`.

use crate::core::error::FetchError;
use crate::core::store::EntryStore;

use crossbeam_channel::Sender;
use crossterm::event::KeyEvent;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

/// Messages delivered to the owning thread.
#[derive(Debug)]
pub enum Notification {
    /// A decoded key press from the terminal.
    Input(KeyEvent),
    /// The terminal was resized.
    Resize { width: u16, height: u16 },
    /// Reading terminal input failed. No further input will arrive.
    InputFailed(io::Error),
    /// The render facing list was rebuilt and the frame is stale.
    EntriesChanged,
    /// A background fetch finished, successfully or not.
    FetchCompleted {
        path: PathBuf,
        result: Result<u64, FetchError>,
    },
}

/// Launches background size fetches.
///
/// Constructed with a clone of the sender whose receiver the event loop drains.
pub struct Fetcher {
    root: PathBuf,
    tx: Sender<Notification>,
    delay: Duration,
    active: Arc<AtomicUsize>,
    spawned: Arc<AtomicUsize>,
}

impl Fetcher {
    /// `root` is joined with entry paths before stat. `delay` is slept before each stat.
    pub fn new(root: PathBuf, tx: Sender<Notification>, delay: Duration) -> Self {
        Self {
            root,
            tx,
            delay,
            active: Arc::new(AtomicUsize::new(0)),
            spawned: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of fetch threads currently running.
    #[inline]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// Number of fetch threads spawned since construction.
    #[inline]
    pub fn spawned(&self) -> usize {
        self.spawned.load(Ordering::Acquire)
    }

    /// Requests the size of `path`.
    ///
    /// The entry is marked `Fetching` before any thread is spawned, so the next resync already
    /// shows it. Requests for entries that are fetching or done do nothing.
    ///
    /// # Returns
    /// true if a background fetch was started.
    pub fn request_fetch(&self, store: &mut EntryStore, path: &Path) -> bool {
        if !store.begin_fetch(path) {
            tracing::debug!(path = %path.display(), "fetch request ignored");
            return false;
        }
        self.spawn(path.to_path_buf());
        true
    }

    fn spawn(&self, path: PathBuf) {
        let target = self.root.join(&path);
        let reply_path = path.clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        let active = Arc::clone(&self.active);

        self.active.fetch_add(1, Ordering::AcqRel);
        self.spawned.fetch_add(1, Ordering::AcqRel);

        let spawned = thread::Builder::new()
            .name("filesum-fetch".into())
            .spawn(move || {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                let result = stat_size(&target);
                if let Err(e) = &result {
                    tracing::warn!(path = %target.display(), error = %e, "size fetch failed");
                }
                active.fetch_sub(1, Ordering::AcqRel);
                // The loop may already be gone on quit.
                let _ = tx.send(Notification::FetchCompleted { path, result });
            });

        if let Err(e) = spawned {
            self.active.fetch_sub(1, Ordering::AcqRel);
            tracing::error!(path = %reply_path.display(), error = %e, "could not spawn fetch thread");
            let _ = self.tx.send(Notification::FetchCompleted {
                path: reply_path,
                result: Err(e.into()),
            });
        }
    }
}

/// Byte size of the file at `path`. Symlinks are followed.
pub fn stat_size(path: &Path) -> Result<u64, FetchError> {
    Ok(fs::metadata(path)?.len())
}
