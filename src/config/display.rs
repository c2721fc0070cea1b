//! Display configuration options for filesum.
//!
//! Read from the `[display]` table of `filesum.toml`.

use crate::core::formatter::SizeUnits;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Display {
    title: String,
    size_units: SizeUnits,
    selection_marker: bool,
    scroll_padding: usize,
    status_line: bool,
}

impl Display {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size_units(&self) -> SizeUnits {
        self.size_units
    }

    pub fn selection_marker(&self) -> bool {
        self.selection_marker
    }

    pub fn scroll_padding(&self) -> usize {
        self.scroll_padding
    }

    pub fn status_line(&self) -> bool {
        self.status_line
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            title: "Git Project Files Summarizer".into(),
            size_units: SizeUnits::Binary,
            selection_marker: true,
            scroll_padding: 3,
            status_line: true,
        }
    }
}
