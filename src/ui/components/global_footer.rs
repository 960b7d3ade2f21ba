use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{
    render_key_hints, KeyHintBarStyle, ACCENT_SUCCESS, BG_ELEVATED, TEXT_MUTED,
};
use crate::script::StepKind;

/// Which hints the footer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterContext {
    /// Conversation is playing, nothing to answer
    #[default]
    Watching,
    /// A choice button row has focus
    Buttons,
    /// A star rating has focus
    Rating,
    /// A multi-choice list has focus
    MultiChoice,
    /// Incoming call overlay is up
    Call,
}

impl FooterContext {
    /// Context for the widget that currently has focus
    pub fn for_widget(kind: Option<&StepKind>, overlay_visible: bool) -> Self {
        if overlay_visible {
            return FooterContext::Call;
        }
        match kind {
            Some(StepKind::ChoiceButtons { .. }) => FooterContext::Buttons,
            Some(StepKind::StarRating { .. }) => FooterContext::Rating,
            Some(StepKind::MultiChoice { .. }) => FooterContext::MultiChoice,
            _ => FooterContext::Watching,
        }
    }
}

/// Global footer showing keyboard shortcuts in minimal style
pub struct GlobalFooter {
    hints: Vec<(&'static str, &'static str)>,
    finished: bool,
}

impl GlobalFooter {
    pub fn for_context(context: FooterContext) -> Self {
        let mut hints = match context {
            FooterContext::Watching => Vec::new(),
            FooterContext::Buttons => vec![("←→", "choose"), ("enter", "answer")],
            FooterContext::Rating => vec![("1-5", "rate"), ("←→", "choose"), ("enter", "answer")],
            FooterContext::MultiChoice => vec![
                ("↑↓", "move"),
                ("space", "toggle"),
                ("s", "send"),
            ],
            FooterContext::Call => vec![("a", "accept call")],
        };
        if context != FooterContext::Call {
            hints.push(("PgUp/PgDn", "scroll"));
        }
        hints.push(("q", "quit"));
        Self {
            hints,
            finished: false,
        }
    }

    /// Show the end-of-conversation marker
    pub fn finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    pub fn hints(&self) -> &[(&'static str, &'static str)] {
        &self.hints
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        render_key_hints(
            area,
            buf,
            &self.hints,
            KeyHintBarStyle::footer_bar(TEXT_MUTED, BG_ELEVATED),
        );

        if self.finished {
            let marker = Line::from(Span::styled(
                "● conversation finished ",
                Style::default()
                    .fg(ACCENT_SUCCESS)
                    .add_modifier(Modifier::BOLD),
            ));
            Paragraph::new(marker)
                .alignment(Alignment::Right)
                .render(area, buf);
        }
    }
}

impl Default for GlobalFooter {
    fn default() -> Self {
        Self::for_context(FooterContext::default())
    }
}
