//! The list view model behind the file pane.
//!
//! [FileList] holds the rows the renderer draws, the fuzzy filter query, the cursor and the
//! scroll offset. Items are replaced wholesale with [FileList::set_items]. The filter query and
//! scroll offset survive the replacement, so a pass that only changes subtitles leaves the
//! view where it was.
//!
//! The cursor is an index into the *visible* (filtered) rows.

use crate::core::formatter::{SizeUnits, format_state};
use crate::core::store::Entry;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use std::path::{Path, PathBuf};

/// One display row. `key` identifies the entry, `title` and `subtitle` are what gets drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    key: PathBuf,
    title: String,
    subtitle: String,
}

impl Row {
    pub fn new(key: PathBuf, title: String, subtitle: String) -> Self {
        Self {
            key,
            title,
            subtitle,
        }
    }

    pub fn from_entry(entry: &Entry, units: SizeUnits) -> Self {
        Self {
            key: entry.path().to_path_buf(),
            title: entry.path().to_string_lossy().into_owned(),
            subtitle: format_state(entry.state(), units),
        }
    }

    #[inline]
    pub fn key(&self) -> &Path {
        &self.key
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }
}

pub struct FileList {
    items: Vec<Row>,
    visible: Vec<usize>,
    filter: String,
    selected: Option<usize>,
    offset: usize,
    matcher: SkimMatcherV2,
}

impl Default for FileList {
    fn default() -> Self {
        Self::new()
    }
}

impl FileList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            filter: String::new(),
            selected: None,
            offset: 0,
            matcher: SkimMatcherV2::default(),
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn items(&self) -> &[Row] {
        &self.items
    }

    #[inline]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Rows that pass the current filter, in item order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Row> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn selected_item(&self) -> Option<&Row> {
        let idx = self.selected?;
        self.visible.get(idx).map(|&i| &self.items[i])
    }

    /// Visible index of the row with the given key.
    pub fn position_of(&self, key: &Path) -> Option<usize> {
        self.visible_items().position(|row| row.key() == key)
    }

    // Mutation

    /// Replaces all rows. The filter is re-applied, the cursor clamped, the offset kept.
    pub fn set_items(&mut self, items: Vec<Row>) {
        self.items = items;
        self.refilter();
        self.clamp();
    }

    /// Points the cursor at visible row `idx`, clamped to the last row.
    pub fn set_selected_index(&mut self, idx: usize) {
        self.selected = if self.visible.is_empty() {
            None
        } else {
            Some(idx.min(self.visible.len() - 1))
        };
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_up(&mut self) -> bool {
        let len = self.visible.len();
        if len == 0 {
            return false;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
        true
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_down(&mut self) -> bool {
        let len = self.visible.len();
        if len == 0 {
            return false;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        });
        true
    }

    pub fn page_up(&mut self, page: usize) {
        let idx = self.selected.unwrap_or(0).saturating_sub(page.max(1));
        self.set_selected_index(idx);
    }

    pub fn page_down(&mut self, page: usize) {
        let idx = self.selected.unwrap_or(0).saturating_add(page.max(1));
        self.set_selected_index(idx);
    }

    pub fn go_to_top(&mut self) {
        self.set_selected_index(0);
    }

    pub fn go_to_bottom(&mut self) {
        self.set_selected_index(usize::MAX);
    }

    /// Sets the fuzzy filter query, keeping the selected row if it still matches.
    pub fn set_filter(&mut self, filter: &str) {
        if self.filter == filter {
            return;
        }
        let target = self.selected_item().map(|row| row.key.clone());

        self.filter.clear();
        self.filter.push_str(filter);
        self.refilter();
        self.offset = 0;

        let idx = target.and_then(|key| self.position_of(&key)).unwrap_or(0);
        self.set_selected_index(idx);
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    /// Adjusts the scroll offset so the cursor is visible in a pane of `height` rows,
    /// keeping `padding` rows of context where possible.
    pub fn scroll_into_view(&mut self, height: usize, padding: usize) -> usize {
        let len = self.visible.len();
        if height == 0 || len <= height {
            self.offset = 0;
            return self.offset;
        }

        let max_offset = len - height;
        let padding = padding.min(height.saturating_sub(1) / 2);
        let selected = self.selected.unwrap_or(0);

        if selected < self.offset + padding {
            self.offset = selected.saturating_sub(padding);
        } else if selected + padding >= self.offset + height {
            self.offset = selected + padding + 1 - height;
        }
        self.offset = self.offset.min(max_offset);
        self.offset
    }

    fn refilter(&mut self) {
        self.visible.clear();
        if self.filter.is_empty() {
            self.visible.extend(0..self.items.len());
            return;
        }
        for (i, row) in self.items.iter().enumerate() {
            if self.matcher.fuzzy_match(&row.title, &self.filter).is_some() {
                self.visible.push(i);
            }
        }
    }

    fn clamp(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            self.selected = None;
            self.offset = 0;
            return;
        }
        if let Some(i) = self.selected {
            self.selected = Some(i.min(len - 1));
        }
        self.offset = self.offset.min(len - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(titles: &[&str], subtitle: &str) -> Vec<Row> {
        titles
            .iter()
            .map(|t| Row::new(PathBuf::from(t), t.to_string(), subtitle.to_string()))
            .collect()
    }

    #[test]
    fn filter_and_selection_survive_subtitle_updates() {
        let mut list = FileList::new();
        list.set_items(rows(&["src/main.rs", "src/lib.rs", "README.md"], "-"));
        list.set_filter("src");
        assert_eq!(list.visible_len(), 2);
        list.set_selected_index(1);

        list.set_items(rows(&["src/main.rs", "src/lib.rs", "README.md"], "42 B"));

        assert_eq!(list.filter(), "src");
        assert_eq!(list.visible_len(), 2);
        assert_eq!(list.selected_index(), Some(1));
        assert_eq!(
            list.selected_item().map(Row::subtitle),
            Some("42 B")
        );
    }

    #[test]
    fn set_filter_keeps_selected_row_when_it_matches() {
        let mut list = FileList::new();
        list.set_items(rows(&["a.txt", "b.rs", "c.rs"], "-"));
        list.set_selected_index(2);

        list.set_filter("rs");
        assert_eq!(list.selected_item().map(Row::title), Some("c.rs"));

        list.set_filter("zzz");
        assert_eq!(list.selected_index(), None);

        list.clear_filter();
        assert_eq!(list.visible_len(), 3);
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn movement_wraps_and_clamps() {
        let mut list = FileList::new();
        list.set_items(rows(&["a", "b", "c"], "-"));
        list.set_selected_index(0);

        assert!(list.move_up());
        assert_eq!(list.selected_index(), Some(2));
        assert!(list.move_down());
        assert_eq!(list.selected_index(), Some(0));

        list.page_down(10);
        assert_eq!(list.selected_index(), Some(2));
        list.page_up(1);
        assert_eq!(list.selected_index(), Some(1));
        list.go_to_top();
        assert_eq!(list.selected_index(), Some(0));
        list.go_to_bottom();
        assert_eq!(list.selected_index(), Some(2));
    }

    #[test]
    fn shrinking_items_clamps_cursor() {
        let mut list = FileList::new();
        list.set_items(rows(&["a", "b", "c"], "-"));
        list.set_selected_index(2);
        list.set_items(rows(&["a"], "-"));
        assert_eq!(list.selected_index(), Some(0));

        list.set_items(Vec::new());
        assert_eq!(list.selected_index(), None);
        assert!(!list.move_down());
    }

    #[test]
    fn scroll_keeps_cursor_in_view() {
        let mut list = FileList::new();
        let titles: Vec<String> = (0..20).map(|i| format!("f{i:02}")).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        list.set_items(rows(&titles, "-"));

        list.set_selected_index(15);
        let offset = list.scroll_into_view(5, 1);
        assert!(offset <= 15 && 15 < offset + 5);

        // Offset is kept across a rebuild.
        list.set_items(rows(&titles, "1 B"));
        assert_eq!(list.offset(), offset);

        list.set_selected_index(0);
        assert_eq!(list.scroll_into_view(5, 1), 0);
    }
}
