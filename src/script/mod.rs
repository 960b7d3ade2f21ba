//! Conversation scripts
//!
//! A script is the only configuration of the demo: an ordered list of
//! [`Step`] records replayed verbatim by the playback sequencer. Scripts are
//! plain JSON so a new conversation can be dropped in without touching
//! playback logic.

mod builtin;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playback::PlaybackMode;

pub use builtin::{builtin_names, DEFAULT_BUILTIN};

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Script has no steps")]
    Empty,
    #[error("Step id {id} does not follow {previous} (ids must strictly increase)")]
    NonIncreasingId { previous: u32, id: u32 },
    #[error("Step {id} offers no choices")]
    EmptyChoices { id: u32 },
    #[error("Step {id} has a blank label")]
    BlankLabel { id: u32 },
    #[error("Step {id} presets {stars} stars (expected 1-5)")]
    InvalidPreset { id: u32, stars: u8 },
    #[error("Step {id} links {phrase:?} which is not in its text")]
    MissingLink { id: u32, phrase: String },
    #[error("Unknown built-in script: {0}")]
    UnknownBuiltin(String),
}

/// Kind-specific payload of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StepKind {
    /// Plain bot message
    BotText { text: String },
    /// Scripted viewer reply
    UserText { text: String },
    /// Bot message containing link phrases
    ConsentText {
        text: String,
        #[serde(default)]
        links: Vec<String>,
    },
    /// Single-choice buttons
    ChoiceButtons { labels: Vec<String> },
    /// Simulated incoming call; never shown in the transcript
    PhoneCall,
    /// Five-star rating, optionally pre-selected for autoplay
    StarRating {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        preset: Option<u8>,
    },
    /// List of options, single or multi select
    MultiChoice {
        options: Vec<String>,
        #[serde(default = "default_allow_multiple")]
        allow_multiple: bool,
    },
}

fn default_allow_multiple() -> bool {
    true
}

impl StepKind {
    /// Short name used in logs and summaries
    pub fn name(&self) -> &'static str {
        match self {
            StepKind::BotText { .. } => "bot-text",
            StepKind::UserText { .. } => "user-text",
            StepKind::ConsentText { .. } => "consent-text",
            StepKind::ChoiceButtons { .. } => "choice-buttons",
            StepKind::PhoneCall => "phone-call",
            StepKind::StarRating { .. } => "star-rating",
            StepKind::MultiChoice { .. } => "multi-choice",
        }
    }

    /// Message text for the text kinds
    pub fn text(&self) -> Option<&str> {
        match self {
            StepKind::BotText { text }
            | StepKind::UserText { text }
            | StepKind::ConsentText { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn is_phone_call(&self) -> bool {
        matches!(self, StepKind::PhoneCall)
    }

    pub fn is_user_text(&self) -> bool {
        matches!(self, StepKind::UserText { .. })
    }

    /// Whether this step renders a widget the viewer answers.
    ///
    /// A star rating with a preset is already answered.
    pub fn expects_input(&self) -> bool {
        match self {
            StepKind::ChoiceButtons { .. } | StepKind::MultiChoice { .. } => true,
            StepKind::StarRating { preset } => preset.is_none(),
            _ => false,
        }
    }
}

/// One immutable unit of the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Rendering key, strictly increasing in script order
    pub id: u32,
    #[serde(flatten)]
    pub kind: StepKind,
}

impl Step {
    pub fn new(id: u32, kind: StepKind) -> Self {
        Self { id, kind }
    }

    pub fn bot(id: u32, text: impl Into<String>) -> Self {
        Self::new(id, StepKind::BotText { text: text.into() })
    }

    pub fn user(id: u32, text: impl Into<String>) -> Self {
        Self::new(id, StepKind::UserText { text: text.into() })
    }

    pub fn buttons(id: u32, labels: &[&str]) -> Self {
        Self::new(
            id,
            StepKind::ChoiceButtons {
                labels: labels.iter().map(|l| l.to_string()).collect(),
            },
        )
    }

    pub fn phone_call(id: u32) -> Self {
        Self::new(id, StepKind::PhoneCall)
    }

    pub fn stars(id: u32, preset: Option<u8>) -> Self {
        Self::new(id, StepKind::StarRating { preset })
    }

    pub fn multi_choice(id: u32, options: &[&str], allow_multiple: bool) -> Self {
        Self::new(
            id,
            StepKind::MultiChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                allow_multiple,
            },
        )
    }
}

/// Who appears on the incoming call overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub name: String,
    pub role: String,
}

impl Default for Caller {
    fn default() -> Self {
        Self {
            name: "Клиника ALTA".to_string(),
            role: "Администратор".to_string(),
        }
    }
}

fn default_title() -> String {
    "AIDADOC".to_string()
}

fn default_subtitle() -> String {
    "Цифровой консьерж".to_string()
}

/// A complete, validated conversation script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    /// Playback mode the script was written for
    #[serde(default)]
    pub mode: PlaybackMode,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default)]
    pub caller: Caller,
    pub steps: Vec<Step>,
}

impl Script {
    /// Build a script from steps (validated)
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Result<Self, ScriptError> {
        let script = Self {
            name: name.into(),
            mode: PlaybackMode::default(),
            title: default_title(),
            subtitle: default_subtitle(),
            caller: Caller::default(),
            steps,
        };
        script.validate()?;
        Ok(script)
    }

    pub fn with_mode(mut self, mode: PlaybackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Parse and validate a script from JSON text
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Script = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script file from disk
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            name = %script.name,
            steps = script.len(),
            "Loaded script"
        );
        Ok(script)
    }

    /// Look up one of the scripts bundled with the binary
    pub fn builtin(name: &str) -> Result<Self, ScriptError> {
        let json = builtin::source(name).ok_or_else(|| ScriptError::UnknownBuiltin(name.into()))?;
        Self::from_json(json)
    }

    pub fn builtin_names() -> Vec<&'static str> {
        builtin::builtin_names()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn has_phone_call(&self) -> bool {
        self.steps.iter().any(|s| s.kind.is_phone_call())
    }

    /// Count of steps per kind name, in first-seen order
    pub fn kind_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for step in &self.steps {
            let name = step.kind.name();
            match counts.iter_mut().find(|(n, _)| *n == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }
        counts
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::Empty);
        }

        let mut previous: Option<u32> = None;
        for step in &self.steps {
            if let Some(prev) = previous {
                if step.id <= prev {
                    return Err(ScriptError::NonIncreasingId {
                        previous: prev,
                        id: step.id,
                    });
                }
            }
            previous = Some(step.id);

            match &step.kind {
                StepKind::ChoiceButtons { labels: choices }
                | StepKind::MultiChoice {
                    options: choices, ..
                } => {
                    if choices.is_empty() {
                        return Err(ScriptError::EmptyChoices { id: step.id });
                    }
                    if choices.iter().any(|c| c.trim().is_empty()) {
                        return Err(ScriptError::BlankLabel { id: step.id });
                    }
                }
                StepKind::StarRating { preset: Some(stars) } => {
                    if !(1..=5).contains(stars) {
                        return Err(ScriptError::InvalidPreset {
                            id: step.id,
                            stars: *stars,
                        });
                    }
                }
                StepKind::ConsentText { text, links } => {
                    if let Some(phrase) = links.iter().find(|l| !text.contains(l.as_str())) {
                        return Err(ScriptError::MissingLink {
                            id: step.id,
                            phrase: phrase.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}
