//! Draw functions for the parts of the frame around the file list.
//!
//! Used by [render](crate::ui::render) to draw the header, the filter prompt, the status
//! line and the keybind help overlay.

use crate::app::{AppState, InputMode};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Title on the left, project root on the right.
pub fn draw_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let cfg = app.config();
    let theme = cfg.theme();
    let title = format!(" {} ", cfg.display().title());
    let path = format!("{} ", shorten_home_path(app.root()));

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(title.width() as u16),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(title, theme.title_style()))),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(path, theme.accent_style())))
            .alignment(Alignment::Right),
        halves[1],
    );
}

/// The filter query while it is being edited, with a block cursor at the end.
pub fn draw_filter_prompt(frame: &mut Frame, app: &AppState, area: Rect) {
    let InputMode::Filter { query } = app.mode() else {
        return;
    };
    let style = app.config().theme().filter_style();

    // Keep the end of a long query visible.
    let visible_width = (area.width as usize).saturating_sub(3);
    let mut shown = query.as_str();
    while shown.width() > visible_width {
        let mut chars = shown.chars();
        chars.next();
        shown = chars.as_str();
    }

    let line = Line::from(vec![
        Span::styled("/", style.add_modifier(Modifier::BOLD)),
        Span::styled(shown.to_string(), style),
        Span::styled(" ", style.add_modifier(Modifier::REVERSED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Status text: cursor position, per state tallies, running fetches and the active filter.
pub fn status_text(app: &AppState) -> String {
    let list = app.list();
    let counts = app.store().counts();

    let position = match list.selected_index() {
        Some(idx) => format!("{}/{}", idx + 1, list.visible_len()),
        None => format!("0/{}", list.visible_len()),
    };

    let mut parts = vec![
        position,
        format!("{} files", list.len()),
        format!("{} fetched", counts.fetched),
    ];
    if counts.unfetched > 0 {
        parts.push(format!("{} unfetched", counts.unfetched));
    }
    if counts.fetching > 0 {
        parts.push(format!("{} fetching", counts.fetching));
    }
    if counts.failed > 0 {
        parts.push(format!("{} failed", counts.failed));
    }
    if !list.filter().is_empty() {
        parts.push(format!("Filter: \"{}\"", list.filter()));
    }
    parts.join(" | ")
}

pub fn draw_status_line(frame: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.config().theme();
    let text = status_text(app);

    let active = app.fetcher().active();
    let busy = if active > 0 {
        format!("{} running ", active)
    } else {
        String::new()
    };

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(busy.width() as u16)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, theme.status_line_style())))
            .block(Block::default().padding(ratatui::widgets::Padding::horizontal(1))),
        halves[0],
    );
    if !busy.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(busy, theme.fetching_style())))
                .alignment(Alignment::Right),
            halves[1],
        );
    }
}

/// Centered overlay listing the configured key bindings.
pub fn draw_keybind_help(frame: &mut Frame, app: &AppState) {
    let theme = app.config().theme();
    let keys = app.config().keys();
    let accent_style = theme.accent_style();

    let fmt_keys = |list: &[String]| -> String {
        if list.is_empty() {
            "-".to_string()
        } else {
            list.join(", ")
        }
    };

    let rows: Vec<(String, &'static str)> = vec![
        (fmt_keys(keys.fetch()), "Compute size of selected file"),
        (fmt_keys(keys.go_up()), "Move selection up"),
        (fmt_keys(keys.go_down()), "Move selection down"),
        (fmt_keys(keys.go_to_top()), "Go to top"),
        (fmt_keys(keys.go_to_bottom()), "Go to bottom"),
        (fmt_keys(keys.page_up()), "Page up"),
        (fmt_keys(keys.page_down()), "Page down"),
        (fmt_keys(keys.filter()), "Filter by path"),
        (fmt_keys(keys.clear_filter()), "Clear filter"),
        (fmt_keys(keys.keybind_help()), "Toggle keybind help"),
        (fmt_keys(keys.quit()), "Quit"),
    ];

    let key_width = rows.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let key_style = accent_style.add_modifier(Modifier::BOLD);
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(k, desc)| {
            let pad = key_width.saturating_sub(k.width());
            Line::from(vec![
                Span::styled(k, key_style),
                Span::raw(" ".repeat(pad + 2)),
                Span::raw(desc),
            ])
        })
        .collect();

    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let area = centered_rect(
        frame.area(),
        content_width.saturating_add(4),
        (lines.len() as u16).saturating_add(2),
    );

    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(" Keybinds ", theme.title_style()))
        .borders(Borders::ALL)
        .border_style(accent_style);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .style(Style::default()),
        area,
    );
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Config;
    use std::path::PathBuf;

    #[test]
    fn centered_rect_is_clamped_and_centered() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(area, 20, 4);
        assert_eq!((r.width, r.height), (20, 4));
        assert_eq!((r.x, r.y), (10, 3));

        let r = centered_rect(area, 100, 100);
        assert_eq!((r.width, r.height), (40, 10));
    }

    #[test]
    fn status_text_reports_position_and_filter() {
        let config = Config::default();
        let paths = ["a.rs", "b.rs", "c.md"].into_iter().map(PathBuf::from).collect();
        let app = AppState::new(&config, PathBuf::from("."), paths);
        assert_eq!(status_text(&app), "1/3 | 3 files | 0 fetched | 3 unfetched");

        let empty = AppState::new(&config, PathBuf::from("."), Vec::new());
        assert_eq!(status_text(&empty), "0/0 | 0 files | 0 fetched");
    }
}
