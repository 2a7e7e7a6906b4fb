//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Key strings bound to each action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
    pub activate: Vec<String>,
    pub back: Vec<String>,
    pub toggle_mouse: Vec<String>,
    pub copy_url: Vec<String>,
    pub open_in_browser: Vec<String>,
    pub refresh: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["PageDown", "Ctrl+d"]),
            prev_page: keys(&["PageUp", "Ctrl+u"]),
            first: keys(&["g", "Home"]),
            last: keys(&["G", "End"]),
            activate: keys(&["Enter", "Right", "l"]),
            back: keys(&["Backspace", "Space", "Left", "h"]),
            toggle_mouse: keys(&["m"]),
            copy_url: keys(&["f"]),
            open_in_browser: keys(&["o"]),
            refresh: keys(&["r"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event. Unbound keys map to [`Action::None`].
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 13] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.next_page, Action::NextPage),
            (&self.prev_page, Action::PrevPage),
            (&self.first, Action::First),
            (&self.last, Action::Last),
            (&self.activate, Action::Activate),
            (&self.back, Action::Back),
            (&self.toggle_mouse, Action::ToggleMouse),
            (&self.copy_url, Action::CopyUrl),
            (&self.open_in_browser, Action::OpenInBrowser),
            (&self.refresh, Action::Refresh),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }

    /// Every configured key string that fails to parse.
    pub fn invalid_bindings(&self) -> Vec<String> {
        [
            &self.quit,
            &self.move_up,
            &self.move_down,
            &self.next_page,
            &self.prev_page,
            &self.first,
            &self.last,
            &self.activate,
            &self.back,
            &self.toggle_mouse,
            &self.copy_url,
            &self.open_in_browser,
            &self.refresh,
        ]
        .into_iter()
        .flatten()
        .filter(|binding| parse_key_string(binding).is_err())
        .cloned()
        .collect()
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings
        .iter()
        .filter_map(|binding| parse_key_string(binding).ok())
        .any(|parsed| parsed.matches(key))
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored on the event side so "G" matches Shift+g terminals.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string such as "j", "Enter", "Space", "Ctrl+c" or "F5".
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (modifier_parts, key_part) = match s.rsplit_once('+') {
        // "+" on its own is a plain key
        Some((mods, key)) if !mods.is_empty() && !key.is_empty() => (Some(mods), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let code = match s.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unknown key: {}", s)),
        },
    };
    Ok(code)
}
