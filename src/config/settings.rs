use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::playback::{PlaybackMode, Timing};
use crate::script::DEFAULT_BUILTIN;
use crate::ui::action::Action;
use crate::util::paths::config_path;

use super::default_keys::default_keybindings;
use super::keys::{parse_key_notation, KeyContext, KeybindingConfig};

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub playback: PlaybackConfig,
    /// Keybinding configuration
    pub keybindings: KeybindingConfig,
}

/// Which script to play and how fast
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Overrides the mode stored in the script
    pub mode: Option<PlaybackMode>,
    /// Script file; takes precedence over `builtin`
    pub script: Option<PathBuf>,
    pub builtin: String,
    pub timing: Timing,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            mode: None,
            script: None,
            builtin: DEFAULT_BUILTIN.to_string(),
            timing: Timing::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

/// TOML representation of the `[playback]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlPlaybackConfig {
    pub mode: Option<PlaybackMode>,
    pub script: Option<PathBuf>,
    pub builtin: Option<String>,
    pub first_delay_ms: Option<u64>,
    pub reveal_delay_ms: Option<u64>,
    pub call_ring_delay_ms: Option<u64>,
    pub call_resume_delay_ms: Option<u64>,
}

/// TOML representation of keybinding configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlKeybindings {
    /// Global keybindings (apply to all contexts)
    #[serde(flatten)]
    pub global: HashMap<String, String>,

    /// Chat keybindings
    pub chat: Option<HashMap<String, String>>,

    /// Incoming call keybindings
    pub call: Option<HashMap<String, String>>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub playback: Option<TomlPlaybackConfig>,
    /// Keybinding configuration
    pub keys: Option<TomlKeybindings>,
}

impl TomlKeybindings {
    /// Convert TOML keybindings to KeybindingConfig
    fn to_keybinding_config(&self) -> KeybindingConfig {
        let mut config = KeybindingConfig::new();

        for (action_name, key_str) in &self.global {
            // Context sections are handled separately
            if matches!(action_name.as_str(), "chat" | "call") {
                continue;
            }
            if let Some((combo, action)) = parse_binding(action_name, key_str) {
                config.global.insert(combo, action);
            }
        }

        if let Some(chat) = &self.chat {
            parse_context_bindings(&mut config, KeyContext::Chat, chat);
        }
        if let Some(call) = &self.call {
            parse_context_bindings(&mut config, KeyContext::Call, call);
        }

        config
    }
}

/// Parse context-specific keybindings
fn parse_context_bindings(
    config: &mut KeybindingConfig,
    context: KeyContext,
    bindings: &HashMap<String, String>,
) {
    let context_map = config.context.entry(context).or_default();
    for (action_name, key_str) in bindings {
        if let Some((combo, action)) = parse_binding(action_name, key_str) {
            context_map.insert(combo, action);
        }
    }
}

fn parse_binding(
    action_name: &str,
    key_str: &str,
) -> Option<(super::keys::KeyCombo, Action)> {
    let Some(action) = parse_action(action_name) else {
        tracing::warn!(action = action_name, "Unknown action in [keys]");
        return None;
    };
    match parse_key_notation(key_str) {
        Ok(combo) => Some((combo, action)),
        Err(e) => {
            tracing::warn!(action = action_name, key = key_str, error = %e, "Invalid key notation");
            None
        }
    }
}

/// Parse an action name string into an Action
pub fn parse_action(name: &str) -> Option<Action> {
    match name {
        "quit" => Some(Action::Quit),

        // Scrolling
        "scroll_up" => Some(Action::ScrollUp(1)),
        "scroll_down" => Some(Action::ScrollDown(1)),
        "scroll_page_up" => Some(Action::ScrollPageUp),
        "scroll_page_down" => Some(Action::ScrollPageDown),
        "scroll_to_top" => Some(Action::ScrollToTop),
        "scroll_to_bottom" => Some(Action::ScrollToBottom),

        // Widgets
        "select_next" => Some(Action::SelectNext),
        "select_prev" => Some(Action::SelectPrev),
        "confirm" => Some(Action::Confirm),
        "submit_choices" => Some(Action::SubmitChoices),
        "rate_1" => Some(Action::Rate(1)),
        "rate_2" => Some(Action::Rate(2)),
        "rate_3" => Some(Action::Rate(3)),
        "rate_4" => Some(Action::Rate(4)),
        "rate_5" => Some(Action::Rate(5)),

        // Call
        "accept_call" => Some(Action::AcceptCall),

        _ => None,
    }
}

impl Config {
    /// Load configuration from the default location, merging with defaults
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load configuration from `path`.
    ///
    /// Never fails: a missing file is created from the bundled example and
    /// an unreadable or malformed one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            Self::create_default_config(path);
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config");
                return Config::default();
            }
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config");
                Config::default()
            }
        }
    }

    /// Parse a config file body on top of the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(keys) = toml_config.keys {
            let user_bindings = keys.to_keybinding_config();
            config.keybindings.merge(user_bindings);
        }

        if let Some(playback) = toml_config.playback {
            config.playback.apply(playback);
        }

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }
}

impl PlaybackConfig {
    fn apply(&mut self, toml: TomlPlaybackConfig) {
        if let Some(mode) = toml.mode {
            self.mode = Some(mode);
        }
        if let Some(script) = toml.script {
            self.script = Some(script);
        }
        if let Some(builtin) = toml.builtin {
            self.builtin = builtin;
        }
        if let Some(ms) = toml.first_delay_ms {
            self.timing.first_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = toml.reveal_delay_ms {
            self.timing.reveal_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = toml.call_ring_delay_ms {
            self.timing.call_ring_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = toml.call_resume_delay_ms {
            self.timing.call_resume_delay = Duration::from_millis(ms);
        }
    }
}
