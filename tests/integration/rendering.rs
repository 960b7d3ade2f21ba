//! Full-frame rendering of the app against a TestBackend

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use super::common::fixtures::{apply_timers, run_until_idle, script_with_call, start_app};
use super::common::terminal::{
    assert_region_contains, buffer_contains, buffer_to_string, render_app,
};
use concierge::ui::Action;
use concierge::{PlaybackMode, Script};

const WIDTH: u16 = 60;
const HEIGHT: u16 = 24;

/// Column where `text` starts on row `y`, comparing cell by cell
fn find_in_row(buffer: &Buffer, y: u16, text: &str) -> Option<u16> {
    let chars: Vec<String> = text.chars().map(|c| c.to_string()).collect();
    let width = buffer.area.width;
    (0..=width.saturating_sub(chars.len() as u16)).find(|&x| {
        chars
            .iter()
            .enumerate()
            .all(|(i, c)| buffer[(x + i as u16, y)].symbol() == c)
    })
}

#[tokio::test(start_paused = true)]
async fn test_header_and_typing_indicator() {
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);

    let terminal = render_app(&mut app, WIDTH, HEIGHT);
    let buffer = terminal.backend().buffer();
    assert_region_contains(buffer, Rect::new(0, 0, WIDTH, 1), "AIDADOC");
    assert_region_contains(buffer, Rect::new(0, 1, WIDTH, 1), "Цифровой консьерж");
    assert!(buffer_contains(buffer, "AIDADOC печатает"));

    apply_timers(&mut app, 1).await;
    let terminal = render_app(&mut app, WIDTH, HEIGHT);
    assert!(buffer_contains(terminal.backend().buffer(), "Здравствуйте"));
}

#[tokio::test(start_paused = true)]
async fn test_user_bubble_is_right_aligned() {
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);
    apply_timers(&mut app, 3).await;

    let terminal = render_app(&mut app, WIDTH, HEIGHT);
    let buffer = terminal.backend().buffer();

    let bot = (0..HEIGHT)
        .find_map(|y| find_in_row(buffer, y, "Здравствуйте"))
        .expect("bot bubble");
    assert!(bot < 5, "bot bubble starts at column {}", bot);

    // The reply row holds "Да" but not the buttons
    let reply = (0..HEIGHT)
        .find(|&y| {
            let row = super::common::terminal::buffer_region_to_string(
                buffer,
                Rect::new(0, y, WIDTH, 1),
            );
            row.contains("Да") && !row.contains("Нет")
        })
        .and_then(|y| find_in_row(buffer, y, "Да"))
        .expect("reply bubble");
    assert!(reply > WIDTH / 2, "reply starts at column {}", reply);
}

#[tokio::test(start_paused = true)]
async fn test_buttons_and_footer_hints() {
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);
    apply_timers(&mut app, 2).await;

    let terminal = render_app(&mut app, WIDTH, HEIGHT);
    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, " Да "));
    assert!(buffer_contains(buffer, " Нет "));
    assert_region_contains(buffer, Rect::new(0, HEIGHT - 1, WIDTH, 1), "answer");
}

#[tokio::test(start_paused = true)]
async fn test_call_overlay_and_finished_marker() {
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);
    run_until_idle(&mut app).await;

    let terminal = render_app(&mut app, WIDTH, HEIGHT);
    let buffer = terminal.backend().buffer();
    assert!(buffer_contains(buffer, "Клиника ALTA"));
    assert!(buffer_contains(buffer, "Администратор"));
    assert!(buffer_contains(buffer, "Входящий звонок"));
    assert!(buffer_contains(buffer, "Принять"));
    assert!(!buffer_contains(buffer, "conversation finished"));

    app.handle_action(Action::AcceptCall);
    run_until_idle(&mut app).await;

    let terminal = render_app(&mut app, WIDTH, HEIGHT);
    let text = buffer_to_string(terminal.backend().buffer());
    assert!(!text.contains("Входящий звонок"));
    assert!(text.contains("Вы записаны на приём"));
    assert!(text.contains("conversation finished"));
}

#[tokio::test(start_paused = true)]
async fn test_consent_links_are_underlined() {
    let mut app = start_app(Script::builtin("triage").unwrap(), PlaybackMode::Scripted);
    apply_timers(&mut app, 4).await;

    let terminal = render_app(&mut app, 100, 30);
    let buffer = terminal.backend().buffer();
    let (x, y) = (0..30)
        .find_map(|y| find_in_row(buffer, y, "условиями").map(|x| (x, y)))
        .expect("consent link");
    assert!(buffer[(x, y)].modifier.contains(Modifier::UNDERLINED));

    let (x, y) = (0..30)
        .find_map(|y| find_in_row(buffer, y, "Перед началом").map(|x| (x, y)))
        .expect("consent text");
    assert!(!buffer[(x, y)].modifier.contains(Modifier::UNDERLINED));
}

#[tokio::test(start_paused = true)]
async fn test_scrolling_away_and_back() {
    let mut app = start_app(Script::builtin("triage").unwrap(), PlaybackMode::Scripted);
    apply_timers(&mut app, 12).await;

    render_app(&mut app, WIDTH, 12);
    assert!(app.chat_view().is_following());

    app.handle_action(Action::ScrollToTop);
    let terminal = render_app(&mut app, WIDTH, 12);
    assert!(!app.chat_view().is_following());
    assert!(buffer_contains(terminal.backend().buffer(), "Здравствуйте"));

    // A new message snaps back to the bottom
    apply_timers(&mut app, 1).await;
    assert!(app.chat_view().is_following());
}
