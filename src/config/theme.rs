//! Theme configuration options for filesum.
//!
//! Colors are given as terminal color names (`"cyan"`) or hex codes (`"#RRGGBB"`).
//! Any color left at `"default"` falls back to the internal theme.
//! # Examples
//! ```toml
//! [theme.title]
//! fg = "#FFFDF5"
//! bg = "#25A065"
//! [theme.selection]
//! bg = "darkgray"
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Style};
use serde::Deserialize;

use std::sync::LazyLock;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Theme {
    title: ColorPair,
    selection: ColorPair,
    accent: ColorPair,
    entry: ColorPair,
    subtitle: ColorPair,
    fetching: ColorPair,
    error: ColorPair,
    filter: ColorPair,
    status_line: ColorPair,
    selection_icon: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: ColorPair {
                fg: Color::Rgb(0xFF, 0xFD, 0xF5),
                bg: Color::Rgb(0x25, 0xA0, 0x65),
            },
            selection: ColorPair {
                bg: Color::Indexed(236),
                ..ColorPair::default()
            },
            accent: ColorPair {
                fg: Color::Indexed(238),
                ..ColorPair::default()
            },
            entry: ColorPair::default(),
            subtitle: ColorPair {
                fg: Color::DarkGray,
                ..ColorPair::default()
            },
            fetching: ColorPair {
                fg: Color::Yellow,
                ..ColorPair::default()
            },
            error: ColorPair {
                fg: Color::Red,
                ..ColorPair::default()
            },
            filter: ColorPair {
                fg: Color::Cyan,
                ..ColorPair::default()
            },
            status_line: ColorPair::default(),
            selection_icon: "> ".into(),
        }
    }
}

impl Theme {
    /// Internal default theme, used as fallback for colors left at Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn title_style(&self) -> Style {
        self.title.style_or(&Theme::internal_defaults().title)
    }

    pub fn selection_style(&self) -> Style {
        self.selection
            .style_or(&Theme::internal_defaults().selection)
    }

    pub fn accent_style(&self) -> Style {
        self.accent.style_or(&Theme::internal_defaults().accent)
    }

    pub fn entry_style(&self) -> Style {
        self.entry.style_or(&Theme::internal_defaults().entry)
    }

    pub fn subtitle_style(&self) -> Style {
        self.subtitle
            .style_or(&Theme::internal_defaults().subtitle)
    }

    pub fn fetching_style(&self) -> Style {
        self.fetching
            .style_or(&Theme::internal_defaults().fetching)
    }

    pub fn error_style(&self) -> Style {
        self.error.style_or(&Theme::internal_defaults().error)
    }

    pub fn filter_style(&self) -> Style {
        self.filter.style_or(&Theme::internal_defaults().filter)
    }

    pub fn status_line_style(&self) -> Style {
        self.status_line
            .style_or(&Theme::internal_defaults().status_line)
    }

    pub fn selection_icon(&self) -> &str {
        &self.selection_icon
    }
}

/// Foreground and background color of one themed element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    /// Replaces Reset colors with those from `other`.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_theme_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let theme: Theme = toml::from_str(
            r##"
            [selection]
            fg = "#ff0000"
            "##,
        )?;

        let style = theme.selection_style();
        assert_eq!(style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(style.bg, Some(Color::Indexed(236)));
        assert_eq!(theme.error_style().fg, Some(Color::Red));
        Ok(())
    }
}
