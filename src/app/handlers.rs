//! Input action handler methods for filesum.
//!
//! This module implements [AppState] methods that process key events, nav/file actions
//! and the filter input mode.

use crate::app::keymap::{FileAction, NavAction, SystemAction};
use crate::app::state::{AppState, InputMode, KeypressResult};

use crossterm::event::{KeyCode::*, KeyEvent, KeyModifiers};

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Handles key events while the filter prompt is open.
    ///
    /// Every edit re-applies the query to the list. Enter keeps the filter, Esc clears it.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let InputMode::Filter { query } = &mut self.mode else {
            return KeypressResult::Continue;
        };

        match key.code {
            Enter => {
                self.mode = InputMode::Normal;
            }
            Esc => {
                self.mode = InputMode::Normal;
                self.sync.list_mut().clear_filter();
            }
            Backspace => {
                query.pop();
                let query = query.clone();
                self.sync.list_mut().set_filter(&query);
            }
            Up => {
                self.sync.list_mut().move_up();
            }
            Down => {
                self.sync.list_mut().move_down();
            }
            Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeypressResult::Quit;
            }
            Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                query.push(c);
                let query = query.clone();
                self.sync.list_mut().set_filter(&query);
            }
            _ => {}
        }
        KeypressResult::Consumed
    }

    /// Handles cursor movement.
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        let page = self.page_size();
        let list = self.sync.list_mut();
        match action {
            NavAction::GoUp => {
                list.move_up();
            }
            NavAction::GoDown => {
                list.move_down();
            }
            NavAction::GoToTop => list.go_to_top(),
            NavAction::GoToBottom => list.go_to_bottom(),
            NavAction::PageUp => list.page_up(page),
            NavAction::PageDown => list.page_down(page),
        }
        KeypressResult::Continue
    }

    /// Handles actions on the selected entry or the list filter.
    pub(super) fn handle_file_action(&mut self, action: FileAction) -> KeypressResult {
        match action {
            FileAction::Fetch => {
                self.request_fetch_selected();
            }
            FileAction::Filter => self.prompt_filter(),
            FileAction::ClearFilter => self.sync.list_mut().clear_filter(),
        }
        KeypressResult::Continue
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
            SystemAction::KeybindHelp => {
                self.show_help = !self.show_help;
                KeypressResult::Consumed
            }
        }
    }

    /// Closes the help overlay on Esc.
    pub(super) fn handle_esc_close_help(&mut self, key: &KeyEvent) -> Option<KeypressResult> {
        if key.code == Esc && self.show_help {
            self.show_help = false;
            return Some(KeypressResult::Consumed);
        }
        None
    }

    /// Opens the filter prompt, seeded with the filter currently applied.
    fn prompt_filter(&mut self) {
        let query = self.sync.list().filter().to_string();
        self.mode = InputMode::Filter { query };
    }

    fn page_size(&self) -> usize {
        self.metrics.list_height.max(1)
    }
}
