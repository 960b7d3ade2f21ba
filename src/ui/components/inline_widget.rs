//! Interactive widgets embedded in the chat, one per widget entry

use ratatui::text::Line;

use super::{ChoiceButtonsState, MultiChoiceState, StarRatingState};
use crate::playback::Entry;
use crate::script::StepKind;

/// A value a widget hands back to playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetReport {
    Choice(String),
    Rating(u8),
    Submitted(Vec<String>),
}

#[derive(Debug, Clone)]
pub enum InlineWidget {
    Buttons(ChoiceButtonsState),
    Stars(StarRatingState),
    MultiChoice(MultiChoiceState),
}

impl InlineWidget {
    pub fn for_step(kind: &StepKind) -> Option<Self> {
        match kind {
            StepKind::ChoiceButtons { labels } => {
                Some(InlineWidget::Buttons(ChoiceButtonsState::new(labels.clone())))
            }
            StepKind::StarRating { preset } => {
                Some(InlineWidget::Stars(StarRatingState::new(*preset)))
            }
            StepKind::MultiChoice {
                options,
                allow_multiple,
            } => Some(InlineWidget::MultiChoice(MultiChoiceState::new(
                options.clone(),
                *allow_multiple,
            ))),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            InlineWidget::Buttons(s) => s.is_done(),
            InlineWidget::Stars(s) => s.is_done(),
            InlineWidget::MultiChoice(s) => s.is_done(),
        }
    }

    pub fn select_next(&mut self) {
        match self {
            InlineWidget::Buttons(s) => s.select_next(),
            InlineWidget::Stars(s) => s.select_next(),
            InlineWidget::MultiChoice(s) => s.select_next(),
        }
    }

    pub fn select_prev(&mut self) {
        match self {
            InlineWidget::Buttons(s) => s.select_prev(),
            InlineWidget::Stars(s) => s.select_prev(),
            InlineWidget::MultiChoice(s) => s.select_prev(),
        }
    }

    /// Activate the highlighted item
    pub fn confirm(&mut self) -> Option<WidgetReport> {
        match self {
            InlineWidget::Buttons(s) => s.choose().map(WidgetReport::Choice),
            InlineWidget::Stars(s) => s.rate_highlighted().map(WidgetReport::Rating),
            InlineWidget::MultiChoice(s) => s.toggle_highlighted().map(WidgetReport::Submitted),
        }
    }

    pub fn submit(&mut self) -> Option<WidgetReport> {
        match self {
            InlineWidget::MultiChoice(s) => s.submit().map(WidgetReport::Submitted),
            _ => None,
        }
    }

    pub fn rate(&mut self, stars: u8) -> Option<WidgetReport> {
        match self {
            InlineWidget::Stars(s) => s.rate(stars).map(WidgetReport::Rating),
            _ => None,
        }
    }

    pub fn lines(&self, width: u16, active: bool) -> Vec<Line<'static>> {
        match self {
            InlineWidget::Buttons(s) => s.lines(width, active),
            InlineWidget::Stars(s) => s.lines(active),
            InlineWidget::MultiChoice(s) => s.lines(active),
        }
    }
}

/// Widget state for each transcript entry, indexed like the transcript
#[derive(Debug, Default)]
pub struct InlineWidgets {
    widgets: Vec<Option<InlineWidget>>,
}

impl InlineWidgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state for entries appended since the last sync
    pub fn sync(&mut self, entries: &[Entry]) {
        for entry in entries.iter().skip(self.widgets.len()) {
            self.widgets.push(InlineWidget::for_step(&entry.step.kind));
        }
    }

    pub fn get(&self, index: usize) -> Option<&InlineWidget> {
        self.widgets.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut InlineWidget> {
        self.widgets.get_mut(index).and_then(Option::as_mut)
    }

    /// The widget that takes keyboard input.
    ///
    /// Only the latest widget can be active, and only while it is
    /// unanswered and no reply has been shown after it.
    pub fn active_index(&self, entries: &[Entry]) -> Option<usize> {
        let index = self.widgets.iter().rposition(Option::is_some)?;
        let widget = self.get(index)?;
        if widget.is_done() {
            return None;
        }
        let answered = entries.iter().skip(index + 1).any(Entry::is_user);
        (!answered).then_some(index)
    }
}
