//! Centered dialog frame and instruction bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::key_hints::{render_key_hints, KeyHintBarStyle};
use super::ACCENT_PRIMARY;

/// A centered dialog frame with title and border
pub struct DialogFrame<'a> {
    title: &'a str,
    width: u16,
    height: u16,
    border_color: Color,
    background: Option<Color>,
}

impl<'a> DialogFrame<'a> {
    pub fn new(title: &'a str, width: u16, height: u16) -> Self {
        Self {
            title,
            width,
            height,
            border_color: ACCENT_PRIMARY,
            background: None,
        }
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Area the dialog occupies inside `area`, capped to its size
    pub fn outer_area(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width.saturating_sub(4));
        let height = self.height.min(area.height.saturating_sub(2));
        Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Render the dialog frame and return the inner area for content
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Rect {
        let dialog_area = self.outer_area(area);
        Clear.render(dialog_area, buf);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border_color));
        if !self.title.is_empty() {
            block = block.title(format!(" {} ", self.title));
        }
        if let Some(bg) = self.background {
            block = block.style(Style::default().bg(bg));
        }

        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);
        inner
    }
}

/// An instruction bar showing keyboard shortcuts
pub struct InstructionBar<'a> {
    instructions: Vec<(&'a str, &'a str)>,
}

impl<'a> InstructionBar<'a> {
    pub fn new(instructions: Vec<(&'a str, &'a str)>) -> Self {
        Self { instructions }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        render_key_hints(
            area,
            buf,
            &self.instructions,
            KeyHintBarStyle::instruction_bar(),
        );
    }
}
