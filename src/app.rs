//! Application state, input handling and list synchronization for filesum.
//!
//! Modules:
//! - state: [AppState], the single owner of the entry store and the render facing list
//! - handlers: key and action handlers implemented on [AppState]
//! - keymap: key parsing and [Action](keymap::Action) lookup
//! - sync: the [Synchronizer] rebuilding the list from the store

pub mod handlers;
pub mod keymap;
pub mod state;
pub mod sync;

pub use state::{AppState, EventResult, InputMode, KeypressResult, LayoutMetrics};
pub use sync::{Reselect, Synchronizer};
