//! Scripted conversation playback
//!
//! [`Sequencer`] is the pure state machine, [`Scheduler`] turns its timer
//! requests into tokio tasks, and [`Playback`] wires the two together
//! behind the event surface the UI talks to.

mod scheduler;
mod sequencer;
mod transcript;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::script::Script;

pub use scheduler::Scheduler;
pub use sequencer::{
    Advance, CallState, Sequencer, Timer, TimerAction, Timing, UserChoice,
};
pub use transcript::{Entry, Origin, Transcript};

/// How viewer choices affect playback
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackMode {
    /// Everything plays on its own; choices only fast-forward the
    /// scripted reply
    #[default]
    Scripted,
    /// Playback stops at each widget until the viewer answers
    Interactive,
}

impl PlaybackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackMode::Scripted => "scripted",
            PlaybackMode::Interactive => "interactive",
        }
    }
}

/// Sequencer plus the timer that drives it
pub struct Playback {
    sequencer: Sequencer,
    scheduler: Scheduler,
}

impl Playback {
    /// Elapsed timers are delivered on `timer_tx` and must be handed back
    /// through [`Playback::on_timer`].
    pub fn new(
        script: Arc<Script>,
        mode: PlaybackMode,
        timing: Timing,
        timer_tx: mpsc::UnboundedSender<Timer>,
    ) -> Self {
        tracing::info!(
            script = %script.name,
            steps = script.len(),
            mode = mode.as_str(),
            "Starting playback"
        );
        Self {
            sequencer: Sequencer::new(script, mode, timing),
            scheduler: Scheduler::new(timer_tx),
        }
    }

    pub fn start(&mut self) {
        self.advance();
    }

    pub fn on_timer(&mut self, timer: Timer) {
        if self.sequencer.fire(&timer) {
            self.advance();
        }
    }

    pub fn choice_selected(&mut self, label: impl Into<String>) -> bool {
        self.record(UserChoice::Label(label.into()))
    }

    pub fn rating_selected(&mut self, stars: u8) -> bool {
        if !(1..=5).contains(&stars) {
            tracing::debug!(stars, "Rejecting out of range rating");
            return false;
        }
        self.record(UserChoice::Rating(stars))
    }

    pub fn multi_choice_submitted(&mut self, labels: Vec<String>) -> bool {
        if labels.is_empty() {
            return false;
        }
        self.record(UserChoice::Labels(labels))
    }

    /// Viewer accepted the incoming call
    pub fn call_accepted(&mut self) -> bool {
        match self.sequencer.end_call() {
            Some(timer) => {
                self.scheduler.schedule(timer);
                true
            }
            None => false,
        }
    }

    /// Stop playback; no pending timer fires afterwards
    pub fn shutdown(&mut self) {
        self.sequencer.cancel();
        self.scheduler.cancel();
        tracing::info!(
            cursor = self.sequencer.cursor(),
            entries = self.sequencer.transcript().len(),
            "Playback stopped"
        );
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn script(&self) -> &Script {
        self.sequencer.script()
    }

    pub fn transcript(&self) -> &Transcript {
        self.sequencer.transcript()
    }

    pub fn overlay_visible(&self) -> bool {
        self.sequencer.overlay_visible()
    }

    pub fn is_finished(&self) -> bool {
        self.sequencer.is_finished() && self.sequencer.pending().is_none()
    }

    /// A bot message is about to appear
    pub fn is_typing(&self) -> bool {
        let reveal_pending = self
            .sequencer
            .pending()
            .is_some_and(|t| t.action == TimerAction::Reveal);
        reveal_pending
            && self
                .sequencer
                .next_step()
                .is_some_and(|step| step.kind.text().is_some() && !step.kind.is_user_text())
    }

    fn record(&mut self, choice: UserChoice) -> bool {
        if !self.sequencer.record_user_choice(choice) {
            return false;
        }
        self.scheduler.cancel();
        self.advance();
        true
    }

    fn advance(&mut self) {
        match self.sequencer.advance() {
            Advance::Scheduled(timer) => self.scheduler.schedule(timer),
            Advance::Finished => {
                tracing::info!(
                    entries = self.sequencer.transcript().len(),
                    "Conversation finished"
                );
            }
            other => {
                tracing::debug!(state = ?other, cursor = self.sequencer.cursor(), "Playback idle");
            }
        }
    }
}
