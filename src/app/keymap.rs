//! Key mapping and action dispatch for the equalizer panel
//!
//! Parses the key strings from the config and maps them onto the actions the panel
//! understands.

use crate::config::Keys;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action of the panel: navigation, gain or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    Nav(NavAction),
    Gain(GainAction),
    System(SystemAction),
}

/// Moving the band selection
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NavAction {
    BandLeft,
    BandRight,
}

/// Adjusting the selected band
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GainAction {
    Raise,
    Lower,
}

/// Closing, preset loading and help
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SystemAction {
    Quit,
    LoadPreset,
    KeyBindHelp,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built from the config
#[derive(Debug)]
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the configured bindings
    #[rustfmt::skip]
    pub fn from_keys(keys: &Keys) -> Self {
        let mut map = HashMap::new();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use GainAction as G;
        use SystemAction as S;

        bind!(keys.band_left(),     Action::Nav(N::BandLeft));
        bind!(keys.band_right(),    Action::Nav(N::BandRight));
        bind!(keys.gain_up(),       Action::Gain(G::Raise));
        bind!(keys.gain_down(),     Action::Gain(G::Lower));
        bind!(keys.load_preset(),   Action::System(S::LoadPreset));
        bind!(keys.help(),          Action::System(S::KeyBindHelp));
        bind!(keys.quit(),          Action::System(S::Quit));

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

        // Terminals report '?' and friends with SHIFT held
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_keys(&Keys::default())
    }
}

/// Parses a key string such as `"q"`, `"Esc"`, `"<c-x>"`, `"Shift+n"` or `"F5"`.
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

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

    if input.chars().count() == 1 {
        let c = input.chars().next()?;
        if c == '+' || c == '-' {
            return Some(Key {
                code: KeyCode::Char(c),
                modifiers,
            });
        }
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
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

/// Human readable form of a key, used by the help overlay.
pub fn key_to_string(key: &Key) -> String {
    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }
    match key.code {
        KeyCode::Char(' ') => out.push_str("Space"),
        KeyCode::Char(c) => out.push(c),
        KeyCode::F(n) => out.push_str(&format!("F{}", n)),
        KeyCode::Up => out.push('↑'),
        KeyCode::Down => out.push('↓'),
        KeyCode::Left => out.push('←'),
        KeyCode::Right => out.push('→'),
        other => out.push_str(&format!("{:?}", other)),
    }
    out
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => log::warn!("ignoring unparsable key binding {:?}", k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_forms() {
        assert_eq!(
            parse_key("<c-x>"),
            Some(Key {
                code: KeyCode::Char('x'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(
            parse_key("Shift+n"),
            Some(Key {
                code: KeyCode::Char('N'),
                modifiers: KeyModifiers::SHIFT
            })
        );
        assert_eq!(
            parse_key("F5"),
            Some(Key {
                code: KeyCode::F(5),
                modifiers: KeyModifiers::NONE
            })
        );
        assert_eq!(
            parse_key("Esc"),
            Some(Key {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE
            })
        );
        assert_eq!(
            parse_key("?"),
            Some(Key {
                code: KeyCode::Char('?'),
                modifiers: KeyModifiers::NONE
            })
        );
        assert_eq!(
            parse_key("+"),
            Some(Key {
                code: KeyCode::Char('+'),
                modifiers: KeyModifiers::NONE
            })
        );
        assert_eq!(parse_key("<q-x>"), None);
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn default_keymap_matches_panel_keys() {
        let keymap = Keymap::default();
        let none = KeyModifiers::NONE;
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('q'), none)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Esc, none)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Left, none)),
            Some(Action::Nav(NavAction::BandLeft))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('l'), none)),
            Some(Action::Nav(NavAction::BandRight))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('j'), none)),
            Some(Action::Gain(GainAction::Lower))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Up, none)),
            Some(Action::Gain(GainAction::Raise))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('p'), none)),
            Some(Action::System(SystemAction::LoadPreset))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Char('x'), none)), None);
    }

    #[test]
    fn shifted_char_falls_back_to_plain_binding() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::System(SystemAction::KeyBindHelp))
        );
    }

    #[test]
    fn key_to_string_is_readable() {
        let key = parse_key("<c-x>").map(|k| key_to_string(&k));
        assert_eq!(key.as_deref(), Some("Ctrl+x"));
        let key = parse_key("Left").map(|k| key_to_string(&k));
        assert_eq!(key.as_deref(), Some("←"));
    }
}
