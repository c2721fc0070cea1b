//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop and the
//! layout helper that splits the screen into header, list, prompt and status rows.
//!
//! This module should stay mostly "pure rendering": it reads state + config and
//! produces widgets. The only state it writes back are the layout metrics.

use crate::app::{AppState, InputMode, LayoutMetrics};
use crate::core::formatter::sanitize_to_exact_width;
use crate::core::store::FetchState;
use crate::ui::widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Lines taken by one list item: the path and the size below it.
pub const ITEM_HEIGHT: u16 = 2;

/// Areas of one frame.
#[derive(Debug, Clone, Copy)]
pub struct Chunks {
    pub header: Rect,
    pub list: Rect,
    pub prompt: Option<Rect>,
    pub status: Option<Rect>,
}

/// Renders the entire terminal UI for filesum on each frame.
pub fn render(frame: &mut Frame, app: &mut AppState) {
    let chunks = layout_chunks(frame.area(), app);
    app.update_layout_metrics(LayoutMetrics {
        list_height: (chunks.list.height / ITEM_HEIGHT) as usize,
    });

    widgets::draw_header(frame, app, chunks.header);
    draw_list(frame, app, chunks.list);

    if let Some(area) = chunks.prompt {
        widgets::draw_filter_prompt(frame, app, area);
    }
    if let Some(area) = chunks.status {
        widgets::draw_status_line(frame, app, area);
    }
    if app.show_help() {
        widgets::draw_keybind_help(frame, app);
    }
}

/// Splits `size` into the header, list, filter prompt and status line areas.
///
/// The prompt row exists only while the filter is being edited, the status row only when
/// enabled in the config.
pub fn layout_chunks(size: Rect, app: &AppState) -> Chunks {
    let show_prompt = matches!(app.mode(), InputMode::Filter { .. });
    let show_status = app.config().display().status_line();

    let mut constraints = vec![Constraint::Length(1), Constraint::Min(0)];
    if show_prompt {
        constraints.push(Constraint::Length(1));
    }
    if show_status {
        constraints.push(Constraint::Length(1));
    }

    let rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let mut next = 2;
    let mut take = |enabled: bool| {
        if !enabled {
            return None;
        }
        let rect = rects.get(next).copied();
        next += 1;
        rect
    };
    let prompt = take(show_prompt);
    let status = take(show_status);

    Chunks {
        header: rects[0],
        list: rects[1],
        prompt,
        status,
    }
}

fn draw_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let cfg = app.config();
    let theme = cfg.theme();
    let list = app.list();

    if list.visible_len() == 0 {
        let msg = if list.is_empty() {
            "No files in this project".to_string()
        } else {
            format!("No matches for \"{}\"", list.filter())
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, theme.subtitle_style()))),
            area,
        );
        return;
    }

    let symbol = if cfg.display().selection_marker() {
        theme.selection_icon()
    } else {
        ""
    };
    let text_width = (area.width as usize).saturating_sub(symbol.width());

    let items: Vec<ListItem> = list
        .visible_items()
        .map(|row| {
            let sub_style = match app.store().get(row.key()).map(|e| e.state()) {
                Some(FetchState::Fetching) => theme.fetching_style(),
                Some(FetchState::Failed(_)) => theme.error_style(),
                _ => theme.subtitle_style(),
            };
            let title = sanitize_to_exact_width(row.title(), text_width);
            let subtitle = sanitize_to_exact_width(&format!("  {}", row.subtitle()), text_width);
            ListItem::new(vec![
                Line::from(Span::styled(title, theme.entry_style())),
                Line::from(Span::styled(subtitle, sub_style)),
            ])
        })
        .collect();

    let widget = List::new(items)
        .highlight_style(theme.selection_style())
        .highlight_symbol(symbol)
        .style(Style::default());

    let mut state = ListState::default()
        .with_offset(list.offset())
        .with_selected(list.selected_index());
    frame.render_stateful_widget(widget, area, &mut state);
}
