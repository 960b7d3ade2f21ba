//! Key combos and vim-style key notation (`C-x`, `M-S-w`, `<CR>`, `<C-End>`)

use std::collections::HashMap;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ui::action::Action;

/// A key code plus modifiers, in the canonical form used for lookups.
///
/// Uppercase ASCII letters are stored as lowercase with SHIFT, so `G` in a
/// config file and a Shift+g key event produce the same combo.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn from_key_event(event: &KeyEvent) -> Self {
        match event.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self::new(
                KeyCode::Char(c.to_ascii_lowercase()),
                event.modifiers | KeyModifiers::SHIFT,
            ),
            code => Self::new(code, event.modifiers),
        }
    }
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_notation(s)
    }
}

/// Which part of the screen owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyContext {
    /// Fallback for every context
    Global,
    /// Watching the chat, possibly with a widget focused
    Chat,
    /// Incoming call overlay is up
    Call,
}

impl KeyContext {
    /// Contexts that can carry their own bindings
    pub fn all_contexts() -> &'static [KeyContext] {
        &[KeyContext::Chat, KeyContext::Call]
    }

    /// The call overlay captures input while visible
    pub fn from_overlay(overlay_visible: bool) -> Self {
        if overlay_visible {
            KeyContext::Call
        } else {
            KeyContext::Chat
        }
    }
}

/// Bindings per context, with a global fallback
#[derive(Debug, Clone, Default)]
pub struct KeybindingConfig {
    pub global: HashMap<KeyCombo, Action>,
    pub context: HashMap<KeyContext, HashMap<KeyCombo, Action>>,
}

impl KeybindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bindings shadow global ones
    pub fn get_action(&self, key: &KeyCombo, context: KeyContext) -> Option<&Action> {
        self.context
            .get(&context)
            .and_then(|bindings| bindings.get(key))
            .or_else(|| self.global.get(key))
    }

    /// Lay `other` over these bindings; its entries win
    pub fn merge(&mut self, other: KeybindingConfig) {
        self.global.extend(other.global);
        for (ctx, bindings) in other.context {
            self.context.entry(ctx).or_default().extend(bindings);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("no key specified")]
    NoKey,
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
    #[error("invalid special key: {0}")]
    InvalidSpecialKey(String),
}

/// Parse vim-style key notation.
///
/// Modifiers are `C-` (Ctrl), `M-` (Alt) and `S-` (Shift), in any order.
/// Named keys go in angle brackets (`<CR>`, `<Esc>`, `<Tab>`, `<BS>`,
/// `<Del>`, arrows, `<PageUp>`, `<PageDown>`, `<Home>`, `<End>`,
/// `<Space>`, `<F1>` to `<F12>`) and may carry modifiers inside
/// (`<C-End>`). Any single character is a key on its own, Cyrillic
/// letters included.
pub fn parse_key_notation(s: &str) -> Result<KeyCombo, KeyParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeyParseError::Empty);
    }

    let (bracketed, mut rest) = match s.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    // A trailing dash is the `-` key itself, not a separator
    while let Some((prefix, tail)) = rest.split_once('-').filter(|(_, t)| !t.is_empty()) {
        modifiers |= match prefix {
            "C" => KeyModifiers::CONTROL,
            "M" => KeyModifiers::ALT,
            "S" => KeyModifiers::SHIFT,
            other => return Err(KeyParseError::InvalidModifier(other.to_string())),
        };
        rest = tail;
    }

    if rest.is_empty() {
        return Err(KeyParseError::NoKey);
    }

    let mut chars = rest.chars();
    let code = match (chars.next(), chars.next(), bracketed) {
        (Some(c), None, false) if c.is_ascii_uppercase() => {
            modifiers |= KeyModifiers::SHIFT;
            KeyCode::Char(c.to_ascii_lowercase())
        }
        (Some(c), None, false) => KeyCode::Char(c),
        _ => named_key(rest).ok_or_else(|| {
            if bracketed {
                KeyParseError::InvalidSpecialKey(rest.to_string())
            } else {
                KeyParseError::InvalidKey(rest.to_string())
            }
        })?,
    };

    Ok(KeyCombo::new(code, modifiers))
}

fn named_key(name: &str) -> Option<KeyCode> {
    let upper = name.to_uppercase();
    let code = match upper.as_str() {
        "CR" | "ENTER" | "RETURN" => KeyCode::Enter,
        "ESC" | "ESCAPE" => KeyCode::Esc,
        "TAB" => KeyCode::Tab,
        "BS" | "BACKSPACE" => KeyCode::Backspace,
        "DEL" | "DELETE" => KeyCode::Delete,
        "UP" => KeyCode::Up,
        "DOWN" => KeyCode::Down,
        "LEFT" => KeyCode::Left,
        "RIGHT" => KeyCode::Right,
        "PAGEUP" | "PGUP" => KeyCode::PageUp,
        "PAGEDOWN" | "PGDN" => KeyCode::PageDown,
        "HOME" => KeyCode::Home,
        "END" => KeyCode::End,
        "SPACE" => KeyCode::Char(' '),
        other => {
            let n: u8 = other.strip_prefix('F')?.parse().ok()?;
            if !(1..=12).contains(&n) {
                return None;
            }
            KeyCode::F(n)
        }
    };
    Some(code)
}
