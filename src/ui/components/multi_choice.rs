//! Option list with single or multiple selection

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::{ACCENT_PRIMARY, TEXT_BOT, TEXT_FAINT, TEXT_USER};

#[derive(Debug, Clone)]
pub struct MultiChoiceState {
    options: Vec<String>,
    allow_multiple: bool,
    /// Selection, in tap order
    selected: Vec<usize>,
    highlighted: usize,
    submitted: bool,
}

impl MultiChoiceState {
    pub fn new(options: Vec<String>, allow_multiple: bool) -> Self {
        Self {
            options,
            allow_multiple,
            selected: Vec::new(),
            highlighted: 0,
            submitted: false,
        }
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() && !self.submitted {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.options.is_empty() && !self.submitted {
            self.highlighted = (self.highlighted + self.options.len() - 1) % self.options.len();
        }
    }

    /// Toggle option `index`.
    ///
    /// In single-select mode this selects and submits immediately,
    /// returning the one label.
    pub fn toggle(&mut self, index: usize) -> Option<Vec<String>> {
        if self.submitted || index >= self.options.len() {
            return None;
        }
        if !self.allow_multiple {
            self.selected = vec![index];
            self.submitted = true;
            return Some(self.selected_labels());
        }
        match self.selected.iter().position(|&i| i == index) {
            Some(pos) => {
                self.selected.remove(pos);
            }
            None => {
                self.selected.push(index);
            }
        }
        None
    }

    pub fn toggle_highlighted(&mut self) -> Option<Vec<String>> {
        self.toggle(self.highlighted)
    }

    pub fn can_submit(&self) -> bool {
        self.allow_multiple && !self.submitted && !self.selected.is_empty()
    }

    /// Submit the selection; empty selections never submit
    pub fn submit(&mut self) -> Option<Vec<String>> {
        if !self.can_submit() {
            return None;
        }
        self.submitted = true;
        Some(self.selected_labels())
    }

    pub fn is_done(&self) -> bool {
        self.submitted
    }

    pub fn selected_labels(&self) -> Vec<String> {
        self.selected
            .iter()
            .map(|&i| self.options[i].clone())
            .collect()
    }

    pub fn lines(&self, active: bool) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = self.is_selected(i);
                let mark = match (self.allow_multiple, selected) {
                    (true, true) => "☑",
                    (true, false) => "☐",
                    (false, true) => "◉",
                    (false, false) => "○",
                };
                let focused = active && !self.submitted && i == self.highlighted;
                let mut style = if selected {
                    Style::default().fg(ACCENT_PRIMARY)
                } else if self.submitted || !active {
                    Style::default().fg(TEXT_FAINT)
                } else {
                    Style::default().fg(TEXT_BOT)
                };
                if focused {
                    style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                }
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("{} {}", mark, option), style),
                ])
            })
            .collect();

        if self.can_submit() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!(" Отправить ({}) ", self.selected.len()),
                    Style::default()
                        .fg(TEXT_USER)
                        .bg(ACCENT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        lines
    }
}
