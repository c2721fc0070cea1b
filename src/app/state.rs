//! Application state and main controller module for filesum.
//!
//! [AppState] is the single owner of everything mutable:
//! - the [EntryStore] holding every project file and its fetch state
//! - the [Synchronizer] and through it the render facing [FileList](crate::ui::list::FileList)
//! - the [Fetcher] that launches background size fetches
//! - both ends of the notification channel the event loop drains
//! - input mode, help overlay and layout metrics
//!
//! Only the thread running the event loop holds an `AppState`, so store mutations never race.
//! Background threads reach it solely through [Notification]s.

use crate::app::keymap::{Action, Keymap};
use crate::app::sync::Synchronizer;
use crate::config::Config;
use crate::core::error::{EnumerationError, FetchError};
use crate::core::store::EntryStore;
use crate::core::walk;
use crate::core::worker::{Fetcher, Notification};
use crate::ui::list::FileList;

use crossbeam_channel::{Receiver, Sender, unbounded};
use crossterm::event::KeyEvent;

use std::io;
use std::path::{Path, PathBuf};

/// Result of a single processed keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
}

/// What the event loop should do after a notification was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Redraw,
    Idle,
    Quit,
}

/// Whether keys drive the list or edit the filter query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Filter {
        query: String,
    },
}

/// Metrics of the last drawn layout, used for paging.
#[derive(Debug, Clone, Copy)]
pub struct LayoutMetrics {
    /// Number of list items that fit in the pane, not terminal lines.
    pub list_height: usize,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self { list_height: 10 }
    }
}

pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) root: PathBuf,

    pub(super) store: EntryStore,
    pub(super) fetcher: Fetcher,
    pub(super) sync: Synchronizer,

    events_tx: Sender<Notification>,
    events_rx: Receiver<Notification>,

    pub(super) mode: InputMode,
    pub(super) show_help: bool,
    pub(super) metrics: LayoutMetrics,
}

impl<'a> AppState<'a> {
    /// Builds the state for `root` with an already enumerated list of relative paths.
    ///
    /// The store is loaded and the first synchronization pass runs before this returns.
    pub fn new(config: &'a Config, root: PathBuf, paths: Vec<PathBuf>) -> Self {
        let (events_tx, events_rx) = unbounded();
        let fetcher = Fetcher::new(
            root.clone(),
            events_tx.clone(),
            config.general().fetch_delay(),
        );
        let sync = Synchronizer::new(events_tx.clone(), config.display().size_units());

        let mut store = EntryStore::new();
        store.load(paths);

        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            root,
            store,
            fetcher,
            sync,
            events_tx,
            events_rx,
            mode: InputMode::Normal,
            show_help: false,
            metrics: LayoutMetrics::default(),
        };
        app.resync();
        app
    }

    /// Enumerates the project at `root` and builds the state from the result.
    pub fn from_project(config: &'a Config, root: &Path) -> Result<Self, EnumerationError> {
        let root = root.canonicalize()?;
        let paths = walk::enumerate(&root, config.general().walk())?;
        tracing::info!(root = %root.display(), files = paths.len(), "project enumerated");
        Ok(Self::new(config, root, paths))
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    #[inline]
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    #[inline]
    pub fn list(&self) -> &FileList {
        self.sync.list()
    }

    #[inline]
    pub fn sync(&self) -> &Synchronizer {
        &self.sync
    }

    #[inline]
    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    #[inline]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[inline]
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    /// A sender for producers outside the app, such as the input forwarder.
    pub fn sender(&self) -> Sender<Notification> {
        self.events_tx.clone()
    }

    /// The receiver the event loop drains.
    #[inline]
    pub fn events(&self) -> &Receiver<Notification> {
        &self.events_rx
    }

    /// Stores the metrics of the frame being drawn and scrolls the cursor into view.
    pub fn update_layout_metrics(&mut self, metrics: LayoutMetrics) {
        self.metrics = metrics;
        let padding = self.config.display().scroll_padding();
        self.sync
            .list_mut()
            .scroll_into_view(metrics.list_height, padding);
    }

    /// Dispatches one notification. Pure mapping from message to action.
    ///
    /// Fails only when terminal input is gone, which ends the event loop.
    pub fn handle_notification(&mut self, notification: Notification) -> io::Result<EventResult> {
        let result = match notification {
            Notification::Input(key) => match self.handle_keypress(key) {
                KeypressResult::Quit => EventResult::Quit,
                KeypressResult::Continue | KeypressResult::Consumed => EventResult::Redraw,
            },
            Notification::Resize { width, height } => {
                tracing::debug!(width, height, "terminal resized");
                EventResult::Redraw
            }
            Notification::EntriesChanged => EventResult::Redraw,
            Notification::FetchCompleted { path, result } => {
                self.apply_fetch_result(&path, result);
                // The resync above posts EntriesChanged, which triggers the redraw.
                EventResult::Idle
            }
            Notification::InputFailed(e) => {
                tracing::error!(error = %e, "terminal input lost");
                return Err(e);
            }
        };
        Ok(result)
    }

    /// Central key handler.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if matches!(self.mode, InputMode::Filter { .. }) {
            return self.handle_input_mode(key);
        }

        if let Some(res) = self.handle_esc_close_help(&key) {
            return res;
        }

        if let Some(action) = self.keymap.lookup(key) {
            match action {
                Action::System(sys_act) => return self.handle_sys_action(sys_act),
                Action::Nav(nav_act) => return self.handle_nav_action(nav_act),
                Action::File(file_act) => return self.handle_file_action(file_act),
            }
        }

        KeypressResult::Continue
    }

    /// Starts a size fetch for `path` and resyncs so "Fetching..." shows right away.
    ///
    /// # Returns
    /// true if a background fetch was started.
    pub fn request_fetch(&mut self, path: &Path) -> bool {
        if !self.fetcher.request_fetch(&mut self.store, path) {
            return false;
        }
        self.resync();
        true
    }

    /// Starts a size fetch for the entry under the cursor.
    pub fn request_fetch_selected(&mut self) -> bool {
        let Some(path) = self.list().selected_item().map(|row| row.key().to_path_buf()) else {
            return false;
        };
        self.request_fetch(&path)
    }

    /// Rebuilds the list from the store.
    pub fn resync(&mut self) {
        self.sync.resync(&self.store);
    }

    fn apply_fetch_result(&mut self, path: &Path, result: Result<u64, FetchError>) {
        match result {
            Ok(size) => self.store.complete_fetch(path, size),
            Err(e) => self.store.fail_fetch(path, e),
        }
        self.resync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::store::FetchState;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn wait_for_fetch(app: &mut AppState) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let n = app.events().recv_timeout(Duration::from_secs(2))?;
            let done = matches!(n, Notification::FetchCompleted { .. });
            app.handle_notification(n)?;
            if done {
                return Ok(());
            }
        }
    }

    #[test]
    fn new_selects_first_row() {
        let config = Config::default();
        let app = AppState::new(
            &config,
            PathBuf::from("."),
            vec![PathBuf::from("a"), PathBuf::from("b")],
        );
        assert_eq!(app.list().selected_index(), Some(0));
        assert_eq!(app.sync().passes(), 1);
    }

    #[test]
    fn enter_fetches_selected_entry() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "hello")?;
        let config = Config::default();
        let mut app = AppState::new(
            &config,
            dir.path().to_path_buf(),
            vec![PathBuf::from("a.txt")],
        );

        let result = app.handle_notification(Notification::Input(key(KeyCode::Enter)))?;
        assert_eq!(result, EventResult::Redraw);
        assert_eq!(
            app.list().selected_item().map(|r| r.subtitle().to_string()),
            Some("Fetching...".to_string())
        );

        wait_for_fetch(&mut app)?;
        assert_eq!(
            app.store().get(Path::new("a.txt")).map(|e| e.state().clone()),
            Some(FetchState::Fetched(5))
        );
        assert_eq!(
            app.list().selected_item().map(|r| r.subtitle().to_string()),
            Some("5 B".to_string())
        );
        Ok(())
    }

    #[test]
    fn failed_fetch_marks_entry() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let config = Config::default();
        let mut app = AppState::new(
            &config,
            dir.path().to_path_buf(),
            vec![PathBuf::from("missing")],
        );

        assert!(app.request_fetch_selected());
        wait_for_fetch(&mut app)?;
        let subtitle = app
            .list()
            .selected_item()
            .map(|r| r.subtitle().to_string())
            .unwrap_or_default();
        assert!(subtitle.starts_with("error:"), "got {subtitle}");
        assert_eq!(app.store().counts().failed, 1);
        Ok(())
    }

    #[test]
    fn quit_and_unbound_keys() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::default();
        let mut app = AppState::new(&config, PathBuf::from("."), Vec::new());
        assert_eq!(app.handle_keypress(key(KeyCode::Null)), KeypressResult::Continue);
        assert_eq!(
            app.handle_notification(Notification::Input(key(KeyCode::Char('q'))))?,
            EventResult::Quit
        );
        Ok(())
    }

    #[test]
    fn page_keys_follow_list_height() {
        let config = Config::default();
        let paths = (0..10).map(|i| PathBuf::from(format!("f{i}"))).collect();
        let mut app = AppState::new(&config, PathBuf::from("."), paths);
        app.update_layout_metrics(LayoutMetrics { list_height: 3 });

        app.handle_keypress(key(KeyCode::PageDown));
        assert_eq!(app.list().selected_index(), Some(3));
        app.handle_keypress(key(KeyCode::PageDown));
        assert_eq!(app.list().selected_index(), Some(6));
    }

    #[test]
    fn lost_input_is_an_error() {
        let config = Config::default();
        let mut app = AppState::new(&config, PathBuf::from("."), Vec::new());
        let lost = io::Error::new(io::ErrorKind::UnexpectedEof, "tty closed");
        let err = app.handle_notification(Notification::InputFailed(lost));
        assert!(matches!(err, Err(e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn filter_mode_edits_keeps_and_clears() {
        let config = Config::default();
        let paths = ["src/main.rs", "src/lib.rs", "README.md"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        let mut app = AppState::new(&config, PathBuf::from("."), paths);

        app.handle_keypress(key(KeyCode::Char('/')));
        assert!(matches!(app.mode(), InputMode::Filter { .. }));
        for c in "src".chars() {
            app.handle_keypress(key(KeyCode::Char(c)));
        }
        assert_eq!(app.list().visible_len(), 2);

        app.handle_keypress(key(KeyCode::Enter));
        assert_eq!(app.mode(), &InputMode::Normal);
        assert_eq!(app.list().filter(), "src");

        // 'q' inside the filter prompt is text, not quit.
        app.handle_keypress(key(KeyCode::Char('/')));
        assert_eq!(app.handle_keypress(key(KeyCode::Char('q'))), KeypressResult::Consumed);
        app.handle_keypress(key(KeyCode::Esc));
        assert_eq!(app.list().filter(), "");
        assert_eq!(app.list().visible_len(), 3);
    }

    #[test]
    fn help_toggles_and_esc_closes() {
        let config = Config::default();
        let mut app = AppState::new(&config, PathBuf::from("."), Vec::new());
        app.handle_keypress(key(KeyCode::Char('?')));
        assert!(app.show_help());
        app.handle_keypress(key(KeyCode::Esc));
        assert!(!app.show_help());
    }
}
