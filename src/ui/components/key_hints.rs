//! Key hint rows: `key action` pairs for the footer and dialog bars.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{ACCENT_PRIMARY, TEXT_FAINT, TEXT_MUTED, TEXT_SECONDARY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHintBarStyle {
    /// Centred, `│`-separated, inside a dialog
    Instruction,
    /// Left-aligned keycaps on a solid bar
    Footer { key_bg: Color, bar_bg: Color },
}

impl KeyHintBarStyle {
    pub fn instruction_bar() -> Self {
        KeyHintBarStyle::Instruction
    }

    pub fn footer_bar(key_bg: Color, bar_bg: Color) -> Self {
        KeyHintBarStyle::Footer { key_bg, bar_bg }
    }

    fn hint_spans(&self, key: &str, action: &str) -> [Span<'static>; 2] {
        match self {
            KeyHintBarStyle::Instruction => [
                Span::styled(key.to_string(), Style::default().fg(ACCENT_PRIMARY)),
                Span::styled(format!(" {action}"), Style::default().fg(TEXT_SECONDARY)),
            ],
            KeyHintBarStyle::Footer { key_bg, .. } => [
                Span::styled(
                    format!(" {key} "),
                    Style::default().fg(TEXT_SECONDARY).bg(*key_bg),
                ),
                Span::styled(format!(" {action}"), Style::default().fg(TEXT_MUTED)),
            ],
        }
    }

    fn gap(&self) -> Span<'static> {
        match self {
            KeyHintBarStyle::Instruction => Span::styled(" │ ", Style::default().fg(TEXT_FAINT)),
            KeyHintBarStyle::Footer { .. } => Span::raw("   "),
        }
    }
}

/// One line of hints for `hints`
pub fn key_hint_line(hints: &[(&str, &str)], style: KeyHintBarStyle) -> Line<'static> {
    let mut spans = Vec::new();
    if matches!(style, KeyHintBarStyle::Footer { .. }) {
        spans.push(Span::raw(" "));
    }
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(style.gap());
        }
        spans.extend(style.hint_spans(key, action));
    }
    Line::from(spans)
}

pub fn render_key_hints(
    area: Rect,
    buf: &mut Buffer,
    hints: &[(&str, &str)],
    style: KeyHintBarStyle,
) {
    let paragraph = Paragraph::new(key_hint_line(hints, style));
    match style {
        KeyHintBarStyle::Instruction => paragraph.alignment(Alignment::Center),
        KeyHintBarStyle::Footer { bar_bg, .. } => paragraph
            .alignment(Alignment::Left)
            .style(Style::default().bg(bar_bg)),
    }
    .render(area, buf);
}
