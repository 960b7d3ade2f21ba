//! Default keybindings
//!
//! This module defines the default keybindings that are used
//! when no user configuration is present.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::keys::{KeyCombo, KeyContext, KeybindingConfig};
use crate::ui::action::Action;

/// Helper to insert a keybinding
fn bind(map: &mut HashMap<KeyCombo, Action>, key: &str, action: Action) {
    if let Ok(combo) = key.parse() {
        map.insert(combo, action);
    }
}

/// Create the default keybindings configuration
pub fn default_keybindings() -> KeybindingConfig {
    let mut config = KeybindingConfig::new();

    // ========== Global Keybindings ==========
    // These work in all modes unless overridden

    bind(&mut config.global, "q", Action::Quit);
    bind(&mut config.global, "C-q", Action::Quit);
    bind(&mut config.global, "C-c", Action::Quit);
    bind(&mut config.global, "<Esc>", Action::Quit);

    bind(&mut config.global, "<PageUp>", Action::ScrollPageUp);
    bind(&mut config.global, "<PageDown>", Action::ScrollPageDown);
    bind(&mut config.global, "C-u", Action::ScrollPageUp);
    bind(&mut config.global, "C-d", Action::ScrollPageDown);
    bind(&mut config.global, "<Home>", Action::ScrollToTop);
    bind(&mut config.global, "<End>", Action::ScrollToBottom);
    bind(&mut config.global, "g", Action::ScrollToTop);
    bind(&mut config.global, "G", Action::ScrollToBottom);

    // Ctrl+Arrow for line scrolling
    config.global.insert(
        KeyCombo::new(KeyCode::Up, KeyModifiers::CONTROL),
        Action::ScrollUp(1),
    );
    config.global.insert(
        KeyCombo::new(KeyCode::Down, KeyModifiers::CONTROL),
        Action::ScrollDown(1),
    );
    bind(&mut config.global, "C-y", Action::ScrollUp(1));
    bind(&mut config.global, "C-e", Action::ScrollDown(1));

    // ========== Chat ==========
    let chat = config.context.entry(KeyContext::Chat).or_default();

    bind(chat, "<Left>", Action::SelectPrev);
    bind(chat, "<Right>", Action::SelectNext);
    bind(chat, "<Up>", Action::SelectPrev);
    bind(chat, "<Down>", Action::SelectNext);
    bind(chat, "<Tab>", Action::SelectNext);
    chat.insert(
        KeyCombo::new(KeyCode::BackTab, KeyModifiers::SHIFT),
        Action::SelectPrev,
    );
    bind(chat, "h", Action::SelectPrev);
    bind(chat, "l", Action::SelectNext);
    bind(chat, "k", Action::SelectPrev);
    bind(chat, "j", Action::SelectNext);
    bind(chat, "<CR>", Action::Confirm);
    bind(chat, "<Space>", Action::Confirm);
    bind(chat, "s", Action::SubmitChoices);

    for stars in 1..=5u8 {
        bind(chat, &stars.to_string(), Action::Rate(stars));
    }

    // ========== Incoming call ==========
    let call = config.context.entry(KeyContext::Call).or_default();

    bind(call, "a", Action::AcceptCall);
    bind(call, "<CR>", Action::AcceptCall);
    bind(call, "y", Action::AcceptCall);

    config
}
