//! Core runtime logic for filesum.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [walk]: ignore-aware enumeration of the project files.
//! - [store]: the [EntryStore] with every file and its fetch state.
//! - [worker]: background size fetches and the [Notification] protocol.
//! - [formatter]: size and state formatting for display.
//! - [error]: [EnumerationError] and [FetchError].
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop.

pub mod error;
pub mod formatter;
pub mod store;
pub mod terminal;
pub mod walk;
pub mod worker;

pub use error::{EnumerationError, FetchError};
pub use formatter::{format_file_size, format_state, sanitize_to_exact_width};
pub use store::{Entry, EntryStore, FetchState, StateCounts};
pub use walk::{WalkOptions, enumerate};
pub use worker::{Fetcher, Notification};
