//! Key binding configuration options for filesum.
//!
//! Read from the `[keys]` table. Each action takes a list of key strings such as
//! `"Enter"`, `"k"`, `"Ctrl+c"` or `"<c-u>"`.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    fetch: Vec<String>,
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    filter: Vec<String>,
    clear_filter: Vec<String>,
    keybind_help: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    fetch,
    go_up,
    go_down,
    go_to_top,
    go_to_bottom,
    page_up,
    page_down,
    filter,
    clear_filter,
    keybind_help,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            fetch: vec!["Enter".into()],
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_to_top: vec!["g".into(), "Home".into()],
            go_to_bottom: vec!["Shift+g".into(), "End".into()],
            page_up: vec!["PageUp".into(), "<c-u>".into()],
            page_down: vec!["PageDown".into(), "<c-d>".into()],
            filter: vec!["/".into()],
            clear_filter: vec!["Ctrl+f".into()],
            keybind_help: vec!["?".into()],
            quit: vec!["q".into(), "Ctrl+c".into()],
        }
    }
}
