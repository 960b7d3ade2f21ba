use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::{Config, KeyCombo, KeyContext};
use crate::playback::{Playback, PlaybackMode, Timer};
use crate::script::{Script, StepKind};
use crate::ui::action::Action;
use crate::ui::components::{
    ChatContent, ChatHeader, ChatView, FooterContext, GlobalFooter, IncomingCall, InlineWidget,
    InlineWidgets, TypingIndicator, WidgetReport,
};
use crate::ui::terminal_guard::TerminalGuard;

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Main application state
pub struct App {
    /// Application configuration
    config: Config,
    /// Whether the app should quit
    should_quit: bool,
    playback: Playback,
    /// Widget state per transcript entry
    widgets: InlineWidgets,
    chat_view: ChatView,
    typing: TypingIndicator,
    /// Elapsed playback timers
    timer_rx: mpsc::UnboundedReceiver<Timer>,
    /// Transcript length at the last sync
    seen_entries: usize,
    /// Tick counter for animations
    tick_count: usize,
}

impl App {
    pub fn new(config: Config, script: Script, mode: PlaybackMode) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let timing = config.playback.timing;

        Self {
            config,
            should_quit: false,
            playback: Playback::new(Arc::new(script), mode, timing, timer_tx),
            widgets: InlineWidgets::new(),
            chat_view: ChatView::new(),
            typing: TypingIndicator::new(),
            timer_rx,
            seen_entries: 0,
            tick_count: 0,
        }
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn chat_view(&self) -> &ChatView {
        &self.chat_view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Begin playback. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        self.playback.start();
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut guard = TerminalGuard::new();
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        self.start();
        let result = self.event_loop(&mut terminal).await;
        self.playback.shutdown();

        guard.cleanup()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                // Terminal input events + tick
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    while event::poll(Duration::from_millis(0))? {
                        match event::read()? {
                            Event::Key(key) => self.handle_key_event(key),
                            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                            _ => {}
                        }
                    }
                    self.tick();
                }

                // Playback timers
                Some(timer) = self.timer_rx.recv() => {
                    self.on_timer(timer);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance animations by one frame
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.typing.tick();
    }

    pub fn on_timer(&mut self, timer: Timer) {
        self.playback.on_timer(timer);
        self.sync();
    }

    /// Wait for the pending playback timer and apply it.
    ///
    /// Returns false without waiting when nothing is scheduled.
    pub async fn apply_next_timer(&mut self) -> bool {
        if self.playback.sequencer().pending().is_none() {
            return false;
        }
        match self.timer_rx.recv().await {
            Some(timer) => {
                self.on_timer(timer);
                true
            }
            None => false,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let combo = KeyCombo::from_key_event(&key);
        let context = KeyContext::from_overlay(self.playback.overlay_visible());
        if let Some(action) = self.config.keybindings.get_action(&combo, context).cloned() {
            self.handle_action(action);
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.chat_view.scroll_up(WHEEL_LINES),
            MouseEventKind::ScrollDown => self.chat_view.scroll_down(WHEEL_LINES),
            _ => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp(n) => self.chat_view.scroll_up(n as usize),
            Action::ScrollDown(n) => self.chat_view.scroll_down(n as usize),
            Action::ScrollPageUp => self.chat_view.page_up(),
            Action::ScrollPageDown => self.chat_view.page_down(),
            Action::ScrollToTop => self.chat_view.scroll_to_top(),
            Action::ScrollToBottom => self.chat_view.scroll_to_bottom(),
            Action::SelectNext => {
                if let Some(widget) = self.active_widget_mut() {
                    widget.select_next();
                }
            }
            Action::SelectPrev => {
                if let Some(widget) = self.active_widget_mut() {
                    widget.select_prev();
                }
            }
            Action::Confirm => self.answer_with(InlineWidget::confirm),
            Action::SubmitChoices => self.answer_with(InlineWidget::submit),
            Action::Rate(stars) => self.answer_with(|w| w.rate(stars)),
            Action::AcceptCall => {
                if self.playback.call_accepted() {
                    tracing::info!("Call accepted");
                }
            }
        }
    }

    fn active_index(&self) -> Option<usize> {
        if self.playback.overlay_visible() {
            return None;
        }
        self.widgets
            .active_index(self.playback.transcript().entries())
    }

    fn active_widget_mut(&mut self) -> Option<&mut InlineWidget> {
        let index = self.active_index()?;
        self.widgets.get_mut(index)
    }

    /// Let the focused widget produce a value and forward it to playback
    fn answer_with(&mut self, f: impl FnOnce(&mut InlineWidget) -> Option<WidgetReport>) {
        let Some(report) = self.active_widget_mut().and_then(f) else {
            return;
        };
        tracing::debug!(report = ?report, "Widget answered");

        let accepted = match report {
            WidgetReport::Choice(label) => self.playback.choice_selected(label),
            WidgetReport::Rating(stars) => self.playback.rating_selected(stars),
            WidgetReport::Submitted(labels) => self.playback.multi_choice_submitted(labels),
        };
        if !accepted {
            tracing::debug!("Answer did not change playback");
        }
        self.sync();
    }

    /// Pick up transcript growth: widget state and auto-follow
    fn sync(&mut self) {
        let entries = self.playback.transcript().entries();
        self.widgets.sync(entries);
        if entries.len() > self.seen_entries {
            self.seen_entries = entries.len();
            self.chat_view.scroll_to_bottom();
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        let script = self.playback.script();
        f.render_widget(ChatHeader::new(&script.title, &script.subtitle), chunks[0]);

        let active = self.active_index();
        let entries = self.playback.transcript().entries();
        let typing = self
            .playback
            .is_typing()
            .then(|| self.typing.line(&format!("{} печатает", script.title)));
        let content = ChatContent {
            entries,
            widgets: &self.widgets,
            active,
            typing,
        };
        self.chat_view.render(chunks[1], f.buffer_mut(), &content);

        let focused_kind: Option<&StepKind> = active.map(|i| &entries[i].step.kind);
        let context = FooterContext::for_widget(focused_kind, self.playback.overlay_visible());
        GlobalFooter::for_context(context)
            .finished(self.playback.is_finished())
            .render(chunks[2], f.buffer_mut());

        if self.playback.overlay_visible() {
            f.render_widget(
                IncomingCall::new(&script.caller).tick(self.tick_count),
                area,
            );
        }
    }
}
