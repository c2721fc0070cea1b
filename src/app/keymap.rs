//! Key mapping and action dispatch for filesum.
//!
//! Maps parsed key strings from the config to [Action]s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, file, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    System(SystemAction),
}

/// Cursor movement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavAction {
    GoUp,
    GoDown,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
}

/// Actions on the selected entry or the list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FileAction {
    Fetch,
    Filter,
    ClearFilter,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Quit,
    KeybindHelp,
}

/// Key + modifiers as used in the keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Mapping from Key to action, built from the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        use NavAction as N;
        use FileAction as F;
        use SystemAction as S;

        bind(keys.go_up(),          Action::Nav(N::GoUp),           &mut map);
        bind(keys.go_down(),        Action::Nav(N::GoDown),         &mut map);
        bind(keys.go_to_top(),      Action::Nav(N::GoToTop),        &mut map);
        bind(keys.go_to_bottom(),   Action::Nav(N::GoToBottom),     &mut map);
        bind(keys.page_up(),        Action::Nav(N::PageUp),         &mut map);
        bind(keys.page_down(),      Action::Nav(N::PageDown),       &mut map);

        bind(keys.fetch(),          Action::File(F::Fetch),         &mut map);
        bind(keys.filter(),         Action::File(F::Filter),        &mut map);
        bind(keys.clear_filter(),   Action::File(F::ClearFilter),   &mut map);

        bind(keys.keybind_help(),   Action::System(S::KeybindHelp), &mut map);
        bind(keys.quit(),           Action::System(S::Quit),        &mut map);

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Terminals disagree on whether shifted characters carry the SHIFT modifier.
        if let KeyCode::Char(c) = key.code {
            let toggled = if key.modifiers.contains(KeyModifiers::SHIFT) {
                key.modifiers - KeyModifiers::SHIFT
            } else if c.is_ascii_uppercase() {
                key.modifiers | KeyModifiers::SHIFT
            } else {
                return None;
            };
            return self
                .map
                .get(&Key {
                    code: key.code,
                    modifiers: toggled,
                })
                .copied();
        }
        None
    }
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>') && s.len() > 2;
    let mut input = if is_bracketed {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    };

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone "+" or "-" is a character, not a separator.
    if input.chars().count() == 1 {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    for part in input.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "unparsable key binding ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Config;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_plain_modified_and_bracketed_keys() {
        assert_eq!(
            parse_key("Enter"),
            Some(Key {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE
            })
        );
        assert_eq!(
            parse_key("Ctrl+c"),
            Some(Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(
            parse_key("<c-u>"),
            Some(Key {
                code: KeyCode::Char('u'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(
            parse_key("Shift+g"),
            Some(Key {
                code: KeyCode::Char('G'),
                modifiers: KeyModifiers::SHIFT
            })
        );
        assert_eq!(parse_key("/").map(|k| k.code), Some(KeyCode::Char('/')));
        assert_eq!(parse_key("PageDown").map(|k| k.code), Some(KeyCode::PageDown));
        assert_eq!(parse_key("F5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn default_bindings_resolve() {
        let keymap = Keymap::from_config(&Config::default());

        assert_eq!(
            keymap.lookup(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::File(FileAction::Fetch))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::System(SystemAction::Quit))
        );
        // Shifted characters match with or without the SHIFT flag.
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('G'), KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoToBottom))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::System(SystemAction::KeybindHelp))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }
}
