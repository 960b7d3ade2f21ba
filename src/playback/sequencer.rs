//! Scripted playback state machine
//!
//! The sequencer owns the transcript and the cursor into the script. It
//! never sleeps: every transition that needs a delay hands back a [`Timer`]
//! describing what should happen and when, and the host feeds the timer
//! back through [`Sequencer::fire`] once it elapses. This keeps the whole
//! playback protocol testable without a clock.

use std::sync::Arc;
use std::time::Duration;

use crate::script::{Script, Step, StepKind};

use super::transcript::Transcript;
use super::PlaybackMode;

/// Delays between playback transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay before the very first step
    pub first_delay: Duration,
    /// Delay before every other step
    pub reveal_delay: Duration,
    /// Delay between reaching a call step and the call overlay appearing
    pub call_ring_delay: Duration,
    /// Delay between accepting the call and moving past it
    pub call_resume_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            first_delay: Duration::from_millis(500),
            reveal_delay: Duration::from_millis(1200),
            call_ring_delay: Duration::from_millis(1000),
            call_resume_delay: Duration::from_millis(500),
        }
    }
}

impl Timing {
    /// Divide every delay by `factor` (2.0 plays twice as fast).
    ///
    /// Delays too long to represent become `Duration::MAX`.
    pub fn scaled(self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        // Saturate instead of panicking when a tiny factor overflows
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() / factor).unwrap_or(Duration::MAX)
        };
        Self {
            first_delay: scale(self.first_delay),
            reveal_delay: scale(self.reveal_delay),
            call_ring_delay: scale(self.call_ring_delay),
            call_resume_delay: scale(self.call_resume_delay),
        }
    }
}

/// Progress of the simulated incoming call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Ringing,
    Ended,
}

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Append the step at the cursor and move past it
    Reveal,
    /// Start ringing and show the call overlay
    ShowCall,
    /// Move past the call step once the call is over
    ResumeAfterCall,
}

/// A delayed transition requested by the sequencer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    /// Identifies the request; timers that were superseded are ignored
    pub seq: u64,
    pub delay: Duration,
    pub action: TimerAction,
}

/// Outcome of [`Sequencer::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// A timer must be scheduled
    Scheduled(Timer),
    /// A timer is already outstanding
    Pending,
    /// Waiting for the viewer to answer a widget
    AwaitingInput,
    /// Suspended until the call is accepted
    Blocked,
    /// Every step has been played
    Finished,
}

/// A viewer's answer to an interactive step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserChoice {
    /// A button label
    Label(String),
    /// Star count, 1 to 5
    Rating(u8),
    /// Submitted multi-choice options, in selection order
    Labels(Vec<String>),
}

impl UserChoice {
    /// Text of the synthesized reply bubble
    pub fn render(&self) -> String {
        match self {
            UserChoice::Label(label) => label.clone(),
            UserChoice::Rating(stars) => {
                let filled = (*stars).min(5) as usize;
                format!("{}{}", "⭐".repeat(filled), "☆".repeat(5 - filled))
            }
            UserChoice::Labels(labels) => labels.join("\n"),
        }
    }
}

/// Reveals script steps into the transcript one at a time
#[derive(Debug)]
pub struct Sequencer {
    script: Arc<Script>,
    mode: PlaybackMode,
    timing: Timing,
    transcript: Transcript,
    cursor: usize,
    call: CallState,
    overlay_visible: bool,
    pending: Option<Timer>,
    /// Id of the revealed step whose widget is waiting for an answer
    awaiting: Option<u32>,
    next_seq: u64,
}

impl Sequencer {
    pub fn new(script: Arc<Script>, mode: PlaybackMode, timing: Timing) -> Self {
        Self {
            script,
            mode,
            timing,
            transcript: Transcript::new(),
            cursor: 0,
            call: CallState::Idle,
            overlay_visible: false,
            pending: None,
            awaiting: None,
            next_seq: 1,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn call_state(&self) -> CallState {
        self.call
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn pending(&self) -> Option<&Timer> {
        self.pending.as_ref()
    }

    pub fn awaiting_input(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len()
    }

    /// Step the cursor points at
    pub fn next_step(&self) -> Option<&Step> {
        self.script.step(self.cursor)
    }

    /// Decide what happens to the step at the cursor.
    pub fn advance(&mut self) -> Advance {
        if self.is_finished() {
            return Advance::Finished;
        }
        if self.pending.is_some() {
            return Advance::Pending;
        }
        if self.awaiting.is_some() {
            return Advance::AwaitingInput;
        }
        if self.blocked_by_call() {
            return Advance::Blocked;
        }

        let is_call = self
            .next_step()
            .is_some_and(|step| step.kind.is_phone_call());

        let (action, delay) = if is_call {
            if self.call == CallState::Ringing {
                return Advance::Blocked;
            }
            (TimerAction::ShowCall, self.timing.call_ring_delay)
        } else if self.cursor == 0 {
            (TimerAction::Reveal, self.timing.first_delay)
        } else {
            (TimerAction::Reveal, self.timing.reveal_delay)
        };

        Advance::Scheduled(self.arm(action, delay))
    }

    /// Apply an elapsed timer. Returns false for timers that are no longer
    /// current (cancelled or superseded).
    pub fn fire(&mut self, timer: &Timer) -> bool {
        match &self.pending {
            Some(pending) if pending.seq == timer.seq => {}
            _ => {
                tracing::debug!(seq = timer.seq, action = ?timer.action, "Ignoring stale timer");
                return false;
            }
        }
        self.pending = None;

        match timer.action {
            TimerAction::Reveal => {
                let Some(step) = self.next_step().cloned() else {
                    return false;
                };
                if self.mode == PlaybackMode::Interactive && step.kind.expects_input() {
                    self.awaiting = Some(step.id);
                }
                tracing::debug!(
                    cursor = self.cursor,
                    step_id = step.id,
                    kind = step.kind.name(),
                    "Revealed step"
                );
                self.transcript.push_scripted(step);
                self.cursor += 1;
            }
            TimerAction::ShowCall => {
                self.call = CallState::Ringing;
                self.overlay_visible = true;
                tracing::debug!(cursor = self.cursor, "Incoming call shown");
            }
            TimerAction::ResumeAfterCall => {
                self.cursor += 1;
                tracing::debug!(cursor = self.cursor, "Resumed after call");
            }
        }

        true
    }

    /// Accept the ringing call. Only the first call has an effect.
    pub fn end_call(&mut self) -> Option<Timer> {
        if self.call != CallState::Ringing {
            return None;
        }
        self.call = CallState::Ended;
        self.overlay_visible = false;
        tracing::debug!(cursor = self.cursor, "Call accepted");
        Some(self.arm(TimerAction::ResumeAfterCall, self.timing.call_resume_delay))
    }

    /// Record the viewer's answer to the current widget.
    ///
    /// Interactive playback appends a reply built from the choice and drops
    /// the scripted reply that directly follows the widget, if any. Scripted
    /// playback reveals the next scripted reply right away and ignores what
    /// was picked; the conversation never branches.
    pub fn record_user_choice(&mut self, choice: UserChoice) -> bool {
        match self.mode {
            PlaybackMode::Interactive => {
                let Some(answering) = self.awaiting.take() else {
                    tracing::debug!(?choice, "No widget awaiting input");
                    return false;
                };
                self.transcript.push_reply(answering, choice.render());
                if let Some(skipped) = self.next_step().filter(|step| step.kind.is_user_text()) {
                    tracing::debug!(step_id = skipped.id, "Skipping scripted reply");
                    self.cursor += 1;
                }
                true
            }
            PlaybackMode::Scripted => {
                let answers_widget = self
                    .cursor
                    .checked_sub(1)
                    .and_then(|i| self.script.step(i))
                    .is_some_and(|step| is_widget(&step.kind));
                let reply = match self.next_step() {
                    Some(step) if answers_widget && step.kind.is_user_text() => step.clone(),
                    _ => {
                        tracing::debug!(?choice, cursor = self.cursor, "Choice has no scripted reply");
                        return false;
                    }
                };
                self.pending = None;
                self.transcript.push_scripted(reply);
                self.cursor += 1;
                true
            }
        }
    }

    /// Drop the outstanding timer, if any
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    fn blocked_by_call(&self) -> bool {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.script.step(i))
            .is_some_and(|prev| prev.kind.is_phone_call())
            && self.call != CallState::Ended
    }

    fn arm(&mut self, action: TimerAction, delay: Duration) -> Timer {
        let timer = Timer {
            seq: self.next_seq,
            delay,
            action,
        };
        self.next_seq += 1;
        self.pending = Some(timer.clone());
        timer
    }
}

fn is_widget(kind: &StepKind) -> bool {
    matches!(
        kind,
        StepKind::ChoiceButtons { .. } | StepKind::MultiChoice { .. } | StepKind::StarRating { .. }
    )
}
