//! Header with the bot avatar, title and subtitle

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::{ACCENT_PRIMARY, BG_BOT, TEXT_BOT, TEXT_MUTED, TEXT_USER};

pub struct ChatHeader<'a> {
    title: &'a str,
    subtitle: &'a str,
}

impl<'a> ChatHeader<'a> {
    pub fn new(title: &'a str, subtitle: &'a str) -> Self {
        Self { title, subtitle }
    }

    /// First letter of the title, shown as the avatar
    pub fn avatar(&self) -> String {
        self.title
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl Widget for ChatHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let bg_style = Style::default().bg(BG_BOT);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_style(bg_style);
            }
        }

        let title = Line::from(vec![
            Span::styled(" ", bg_style),
            Span::styled(
                format!(" {} ", self.avatar()),
                Style::default()
                    .fg(TEXT_USER)
                    .bg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ", bg_style),
            Span::styled(
                self.title.to_string(),
                bg_style.fg(TEXT_BOT).add_modifier(Modifier::BOLD),
            ),
        ]);
        buf.set_line(area.x, area.y, &title, area.width);

        if area.height > 1 {
            let subtitle = Line::from(vec![
                Span::styled("     ", bg_style),
                Span::styled(self.subtitle.to_string(), bg_style.fg(TEXT_MUTED)),
            ]);
            buf.set_line(area.x, area.y + 1, &subtitle, area.width);
        }
    }
}
