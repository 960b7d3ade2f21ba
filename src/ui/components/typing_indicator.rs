use ratatui::{
    style::Style,
    text::{Line, Span},
};

use super::{BG_BOT, TEXT_FAINT, TEXT_MUTED};

const FRAMES: &[&str] = &["●∙∙", "∙●∙", "∙∙●", "∙●∙"];

/// Ticks each frame stays on screen
const TICKS_PER_FRAME: usize = 8;

/// Bouncing dots shown in a bot bubble while the next message is pending
#[derive(Debug, Default)]
pub struct TypingIndicator {
    tick: usize,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[(self.tick / TICKS_PER_FRAME) % FRAMES.len()]
    }

    pub fn line(&self, label: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!(" {} ", self.frame()),
                Style::default().fg(TEXT_MUTED).bg(BG_BOT),
            ),
            Span::styled(format!(" {}", label), Style::default().fg(TEXT_FAINT)),
        ])
    }
}
