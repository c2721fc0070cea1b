//! Rebuilds the render facing list from the entry store.
//!
//! Every pass is a full rebuild: snapshot the store, map each entry to a [Row], hand the rows
//! to the [FileList], then put the cursor back on the entry it was on before. The cursor is
//! tracked by entry path, never by index, so rows may move between passes without the
//! selection jumping to a different file.
//!
//! The [Synchronizer] owns the list. Nothing else replaces its rows.

use crate::core::formatter::SizeUnits;
use crate::core::store::EntryStore;
use crate::core::worker::Notification;
use crate::ui::list::{FileList, Row};

use crossbeam_channel::Sender;

/// Where the cursor ended up after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reselect {
    /// The previously selected entry was found again at this visible index.
    Kept(usize),
    /// Nothing was selected before. The first row is selected if there is one.
    Initial(Option<usize>),
    /// The previously selected entry is gone. The cursor fell back to a clamped position.
    Missed(Option<usize>),
}

pub struct Synchronizer {
    list: FileList,
    tx: Sender<Notification>,
    units: SizeUnits,
    passes: u64,
}

impl Synchronizer {
    /// `tx` must feed the channel the event loop drains.
    pub fn new(tx: Sender<Notification>, units: SizeUnits) -> Self {
        Self {
            list: FileList::new(),
            tx,
            units,
            passes: 0,
        }
    }

    #[inline]
    pub fn list(&self) -> &FileList {
        &self.list
    }

    /// Mutable access for cursor movement and filtering. Rows are only replaced by [Self::resync].
    #[inline]
    pub fn list_mut(&mut self) -> &mut FileList {
        &mut self.list
    }

    /// Number of completed passes.
    #[inline]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Rebuilds the list from `store`, restores the selection and requests a redraw.
    pub fn resync(&mut self, store: &EntryStore) -> Reselect {
        let selected = self.list.selected_item().map(|row| row.key().to_path_buf());

        let rows: Vec<Row> = store
            .snapshot()
            .iter()
            .map(|entry| Row::from_entry(entry, self.units))
            .collect();
        self.list.set_items(rows);

        let outcome = match selected {
            Some(key) => match self.list.position_of(&key) {
                Some(idx) => {
                    self.list.set_selected_index(idx);
                    Reselect::Kept(idx)
                }
                None => {
                    tracing::warn!(path = %key.display(), "selected entry missing after resync");
                    Reselect::Missed(self.list.selected_index())
                }
            },
            None => {
                if self.list.visible_len() > 0 {
                    self.list.set_selected_index(0);
                }
                Reselect::Initial(self.list.selected_index())
            }
        };

        self.passes += 1;
        tracing::debug!(
            pass = self.passes,
            rows = self.list.len(),
            visible = self.list.visible_len(),
            outcome = ?outcome,
            "resync"
        );

        // The loop may already be gone on quit.
        let _ = self.tx.send(Notification::EntriesChanged);
        outcome
    }
}
