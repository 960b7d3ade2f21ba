//! Full-screen incoming call overlay

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{
    DialogFrame, InstructionBar, ACCENT_DANGER, ACCENT_SUCCESS, BG_ELEVATED, TEXT_MUTED,
    TEXT_SECONDARY, TEXT_USER,
};
use crate::script::Caller;

const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 11;

/// Ticks per half cycle of the ringing pulse
const PULSE_TICKS: usize = 30;

pub struct IncomingCall<'a> {
    caller: &'a Caller,
    tick: usize,
}

impl<'a> IncomingCall<'a> {
    pub fn new(caller: &'a Caller) -> Self {
        Self { caller, tick: 0 }
    }

    /// Animation tick driving the ringing pulse
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    fn ringing_line(&self) -> Line<'static> {
        let bright = (self.tick / PULSE_TICKS) % 2 == 0;
        let style = if bright {
            Style::default().fg(ACCENT_SUCCESS).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        Line::from(Span::styled("☎  Входящий звонок…", style))
    }
}

impl Widget for IncomingCall<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Dim everything behind the overlay
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                buf[(x, y)].set_style(Style::default().fg(TEXT_MUTED).bg(BG_ELEVATED));
            }
        }

        let inner = DialogFrame::new("", DIALOG_WIDTH, DIALOG_HEIGHT)
            .border_color(ACCENT_SUCCESS)
            .background(BG_ELEVATED)
            .render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // pad
            Constraint::Length(1), // ringing
            Constraint::Length(1), // pad
            Constraint::Length(1), // name
            Constraint::Length(1), // role
            Constraint::Length(1), // pad
            Constraint::Length(1), // buttons
            Constraint::Min(0),
            Constraint::Length(1), // instructions
        ])
        .split(inner);

        Paragraph::new(self.ringing_line())
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Line::from(Span::styled(
            self.caller.name.clone(),
            Style::default().fg(TEXT_USER).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

        Paragraph::new(Line::from(Span::styled(
            self.caller.role.clone(),
            Style::default().fg(TEXT_SECONDARY),
        )))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        let buttons = Line::from(vec![
            Span::styled(
                " Отклонить ",
                Style::default().fg(TEXT_USER).bg(ACCENT_DANGER),
            ),
            Span::raw("      "),
            Span::styled(
                " Принять ",
                Style::default()
                    .fg(TEXT_USER)
                    .bg(ACCENT_SUCCESS)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(chunks[6], buf);

        InstructionBar::new(vec![("a", "accept")]).render(chunks[8], buf);
    }
}
