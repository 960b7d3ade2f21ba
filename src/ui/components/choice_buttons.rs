//! Single-choice button row

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::{ACCENT_PRIMARY, BG_BOT, TEXT_FAINT, TEXT_USER};

/// Buttons that report one label, once
#[derive(Debug, Clone)]
pub struct ChoiceButtonsState {
    labels: Vec<String>,
    highlighted: usize,
    chosen: Option<usize>,
}

impl ChoiceButtonsState {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            highlighted: 0,
            chosen: None,
        }
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn select_next(&mut self) {
        if !self.labels.is_empty() && self.chosen.is_none() {
            self.highlighted = (self.highlighted + 1) % self.labels.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.labels.is_empty() && self.chosen.is_none() {
            self.highlighted = (self.highlighted + self.labels.len() - 1) % self.labels.len();
        }
    }

    /// Choose the highlighted button. Returns the label the first time only.
    pub fn choose(&mut self) -> Option<String> {
        if self.chosen.is_some() {
            return None;
        }
        let label = self.labels.get(self.highlighted)?.clone();
        self.chosen = Some(self.highlighted);
        Some(label)
    }

    pub fn is_done(&self) -> bool {
        self.chosen.is_some()
    }

    #[cfg(test)]
    pub fn chosen_label(&self) -> Option<&str> {
        self.chosen.map(|i| self.labels[i].as_str())
    }

    /// Buttons laid out left to right, wrapping at `width`
    pub fn lines(&self, width: u16, active: bool) -> Vec<Line<'static>> {
        let width = width as usize;
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];
        let mut used = 2;

        for (i, label) in self.labels.iter().enumerate() {
            let text = format!(" {} ", label);
            let text_width = UnicodeWidthStr::width(text.as_str());
            if used > 2 && used + 1 + text_width > width {
                lines.push(Line::from(std::mem::replace(
                    &mut spans,
                    vec![Span::raw("  ")],
                )));
                used = 2;
            }
            if used > 2 {
                spans.push(Span::raw(" "));
                used += 1;
            }
            spans.push(Span::styled(text, self.button_style(i, active)));
            used += text_width;
        }
        lines.push(Line::from(spans));
        lines
    }

    fn button_style(&self, index: usize, active: bool) -> Style {
        if self.chosen == Some(index) {
            return Style::default()
                .fg(TEXT_USER)
                .bg(ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD);
        }
        if active && index == self.highlighted {
            return Style::default()
                .fg(ACCENT_PRIMARY)
                .bg(BG_BOT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if self.chosen.is_some() || !active {
            return Style::default().fg(TEXT_FAINT).bg(BG_BOT);
        }
        Style::default().fg(ACCENT_PRIMARY).bg(BG_BOT)
    }
}
