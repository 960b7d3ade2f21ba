//! Scrollable chat transcript

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

use super::{
    Bubble, InlineWidgets, Side, ACCENT_PRIMARY, BG_BOT, BG_SCREEN, TEXT_BOT, TEXT_FAINT,
    TEXT_USER,
};
use crate::playback::Entry;
use crate::script::StepKind;

/// Everything the chat view draws for one frame
pub struct ChatContent<'a> {
    pub entries: &'a [Entry],
    pub widgets: &'a InlineWidgets,
    /// Index of the entry whose widget has keyboard focus
    pub active: Option<usize>,
    /// Typing indicator shown below the last entry
    pub typing: Option<Line<'static>>,
}

/// Chat view with scroll offset counted from the bottom.
///
/// An offset of zero follows the newest message.
#[derive(Debug, Default)]
pub struct ChatView {
    scroll_offset: usize,
    /// Height of the last rendered viewport, used for page scrolling
    viewport_height: usize,
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_following(&self) -> bool {
        self.scroll_offset == 0
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page_size());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page_size());
    }

    pub fn scroll_to_top(&mut self) {
        // Clamped during render
        self.scroll_offset = usize::MAX;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    fn page_size(&self) -> usize {
        self.viewport_height.saturating_sub(2).max(1)
    }

    fn content_area(area: Rect) -> Rect {
        Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(3),
            height: area.height,
        }
    }

    /// All lines of the conversation at `width`
    pub fn build_lines(content: &ChatContent<'_>, width: u16) -> Vec<Line<'static>> {
        let bot = Style::default().fg(TEXT_BOT).bg(BG_BOT);
        let user = Style::default().fg(TEXT_USER).bg(ACCENT_PRIMARY);
        let link = Style::default().fg(ACCENT_PRIMARY).bg(BG_BOT);

        let mut lines = vec![Line::default()];
        for (index, entry) in content.entries.iter().enumerate() {
            let before = lines.len();
            match &entry.step.kind {
                StepKind::BotText { text } => {
                    lines.extend(Bubble::new(text, Side::Left, bot).lines(width));
                }
                StepKind::ConsentText { text, links } => {
                    lines.extend(
                        Bubble::new(text, Side::Left, bot)
                            .links(links, link)
                            .lines(width),
                    );
                }
                StepKind::UserText { text } => {
                    lines.extend(Bubble::new(text, Side::Right, user).lines(width));
                }
                StepKind::ChoiceButtons { .. }
                | StepKind::StarRating { .. }
                | StepKind::MultiChoice { .. } => {
                    if let Some(widget) = content.widgets.get(index) {
                        let active = content.active == Some(index);
                        lines.extend(widget.lines(width, active));
                    }
                }
                StepKind::PhoneCall => {}
            }
            if lines.len() > before {
                lines.push(Line::default());
            }
        }

        if let Some(typing) = &content.typing {
            lines.push(typing.clone());
            lines.push(Line::default());
        }
        lines
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, content: &ChatContent<'_>) {
        let background = Style::default().bg(BG_SCREEN);
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_style(background);
            }
        }

        let inner = Self::content_area(area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = Self::build_lines(content, inner.width);
        let total = lines.len();
        let visible = inner.height as usize;
        self.viewport_height = visible;

        let max_scroll = total.saturating_sub(visible);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let start = total.saturating_sub(self.scroll_offset + visible);
        let end = total.saturating_sub(self.scroll_offset);
        let visible_lines: Vec<Line<'static>> = lines[start..end].to_vec();
        Paragraph::new(visible_lines)
            .style(background)
            .render(inner, buf);

        if total > visible {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(Some("│"))
                .thumb_symbol("┃")
                .style(Style::default().fg(TEXT_FAINT));
            let mut state = ScrollbarState::new(max_scroll).position(max_scroll - self.scroll_offset);
            scrollbar.render(area, buf, &mut state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::Transcript;
    use crate::script::Step;

    fn transcript(n: u32) -> Transcript {
        let mut transcript = Transcript::new();
        for id in 1..=n {
            transcript.push_scripted(Step::bot(id, format!("Сообщение {}", id)));
        }
        transcript
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_each_entry_followed_by_blank_line() {
        let transcript = transcript(2);
        let widgets = InlineWidgets::new();
        let content = ChatContent {
            entries: transcript.entries(),
            widgets: &widgets,
            active: None,
            typing: None,
        };
        let lines = ChatView::build_lines(&content, 40);
        // leading pad + (bubble + blank) * 2
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_follows_newest_message() {
        let transcript = transcript(20);
        let mut widgets = InlineWidgets::new();
        widgets.sync(transcript.entries());
        let content = ChatContent {
            entries: transcript.entries(),
            widgets: &widgets,
            active: None,
            typing: None,
        };

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        let mut view = ChatView::new();
        view.render(area, &mut buf, &content);

        let text: String = (0..area.height).map(|y| row(&buf, y)).collect();
        assert!(text.contains("Сообщение 20"));
        assert!(!text.contains("Сообщение 1 "));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let transcript = transcript(20);
        let widgets = InlineWidgets::new();
        let content = ChatContent {
            entries: transcript.entries(),
            widgets: &widgets,
            active: None,
            typing: None,
        };

        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        let mut view = ChatView::new();
        view.scroll_to_top();
        view.render(area, &mut buf, &content);

        // 1 pad line + 20 * (bubble + blank)
        assert_eq!(view.scroll_offset(), 41 - 6);
        assert!(row(&buf, 1).contains("Сообщение 1"));

        view.page_down();
        assert_eq!(view.scroll_offset(), 41 - 6 - 4);
        view.scroll_to_bottom();
        assert!(view.is_following());
    }
}
