//! Display formatting for entries in filesum.
//!
//! Turns fetch states into the subtitle text shown under each path and fits text into a
//! fixed column width for the list pane.

use crate::core::store::FetchState;

use humansize::{BINARY, DECIMAL, format_size};
use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

/// Subtitle of entries whose size was never requested.
pub const UNFETCHED_LABEL: &str = "-";
/// Subtitle of entries with a fetch in flight.
pub const FETCHING_LABEL: &str = "Fetching...";

/// Unit system used for sizes.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnits {
    /// KiB, MiB, GiB
    #[default]
    Binary,
    /// kB, MB, GB
    Decimal,
}

/// Formats a byte count. Sizes below one unit are printed as plain bytes.
pub fn format_file_size(size: u64, units: SizeUnits) -> String {
    match units {
        SizeUnits::Binary => format_size(size, BINARY),
        SizeUnits::Decimal => format_size(size, DECIMAL),
    }
}

/// Subtitle text for an entry in the given state.
pub fn format_state(state: &FetchState, units: SizeUnits) -> String {
    match state {
        FetchState::Unfetched => UNFETCHED_LABEL.to_string(),
        FetchState::Fetching => FETCHING_LABEL.to_string(),
        FetchState::Fetched(size) => format_file_size(*size, units),
        FetchState::Failed(err) => format!("error: {}", err.message()),
    }
}

/// Truncates or pads `line` so that it occupies exactly `pane_width` terminal columns.
///
/// Tabs expand to the next multiple of four, other control characters are dropped.
pub fn sanitize_to_exact_width(line: &str, pane_width: usize) -> String {
    let mut out = String::with_capacity(pane_width);
    let mut current_w = 0;

    for ch in line.chars() {
        if ch == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > pane_width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if ch.is_control() {
            continue;
        }

        let w = ch.width().unwrap_or(0);
        if current_w + w > pane_width {
            break;
        }

        out.push(ch);
        current_w += w;
    }

    if current_w < pane_width {
        out.push_str(&" ".repeat(pane_width - current_w));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;

    #[test]
    fn states_render_as_labels() {
        let units = SizeUnits::Binary;
        assert_eq!(format_state(&FetchState::Unfetched, units), "-");
        assert_eq!(format_state(&FetchState::Fetching, units), "Fetching...");
        assert_eq!(format_state(&FetchState::Fetched(42), units), "42 B");

        let failed = FetchState::Failed(io::Error::new(io::ErrorKind::NotFound, "gone").into());
        assert_eq!(format_state(&failed, units), "error: gone");
    }

    #[test]
    fn binary_and_decimal_units() {
        assert_eq!(format_file_size(2048, SizeUnits::Binary), "2 KiB");
        assert_eq!(format_file_size(2000, SizeUnits::Decimal), "2 kB");
    }

    #[test]
    fn exact_width_pads_and_truncates() {
        assert_eq!(sanitize_to_exact_width("ab", 4), "ab  ");
        assert_eq!(sanitize_to_exact_width("abcdef", 4), "abcd");
        assert_eq!(sanitize_to_exact_width("a\tb", 6), "a   b ");
        assert_eq!(sanitize_to_exact_width("a\u{7}b", 3), "ab ");
    }
}
