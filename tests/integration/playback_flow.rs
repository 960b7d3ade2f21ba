//! Timed playback driven through the app, on tokio's paused clock

use std::time::Duration;

use tokio::time::Instant;

use super::common::fixtures::{
    apply_timers, run_until_idle, script_with_call, script_without_call, start_app,
    transcript_texts,
};
use concierge::playback::{CallState, Origin};
use concierge::ui::Action;
use concierge::{PlaybackMode, Script, Step};

/// Paused-clock timers fire on their deadline, give or take a tick
fn assert_elapsed(since: Instant, millis: u64) {
    let elapsed = since.elapsed();
    let expected = Duration::from_millis(millis);
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(10),
        "expected {:?}, got {:?}",
        expected,
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn test_scripted_triage_plays_through_call() {
    let mut app = start_app(Script::builtin("triage").unwrap(), PlaybackMode::Scripted);

    // Everything up to the call step plays without input
    run_until_idle(&mut app).await;
    assert!(app.playback().overlay_visible());
    assert_eq!(app.playback().sequencer().call_state(), CallState::Ringing);
    assert_eq!(app.playback().transcript().len(), 27);

    // Widget keys do nothing while the phone rings
    app.handle_action(Action::Confirm);
    app.handle_action(Action::Rate(3));
    assert_eq!(app.playback().transcript().len(), 27);

    app.handle_action(Action::AcceptCall);
    assert!(!app.playback().overlay_visible());
    run_until_idle(&mut app).await;

    assert!(app.playback().is_finished());
    let entries = app.playback().transcript().entries();
    assert_eq!(entries.len(), 55);
    assert!(entries.iter().all(|e| !e.step.kind.is_phone_call()));
    assert!(entries.windows(2).all(|w| w[0].step.id < w[1].step.id));
    assert!(entries.iter().all(|e| e.origin == Origin::Scripted));
}

#[tokio::test(start_paused = true)]
async fn test_reveal_delays() {
    let start = Instant::now();
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);

    apply_timers(&mut app, 1).await;
    assert_elapsed(start, 500);

    apply_timers(&mut app, 1).await;
    assert_elapsed(start, 1700);

    // user reply, last bot line, then the ring
    apply_timers(&mut app, 3).await;
    assert_elapsed(start, 1700 + 1200 + 1200 + 1000);
    assert!(app.playback().overlay_visible());
}

#[tokio::test(start_paused = true)]
async fn test_scripted_choice_fast_forwards_reply() {
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);
    apply_timers(&mut app, 2).await;
    assert_eq!(app.playback().transcript().len(), 2);

    // The viewer picks "Нет" but the script says "Да"
    app.handle_action(Action::SelectNext);
    app.handle_action(Action::Confirm);

    assert_eq!(transcript_texts(&app), vec!["Здравствуйте", "Да"]);
    assert_eq!(app.playback().sequencer().cursor(), 3);

    // A second confirm is ignored
    app.handle_action(Action::Confirm);
    assert_eq!(app.playback().transcript().len(), 3);

    let before = Instant::now();
    apply_timers(&mut app, 1).await;
    assert_elapsed(before, 1200);
    assert_eq!(
        transcript_texts(&app).last().map(String::as_str),
        Some("Сейчас с вами свяжется администратор")
    );
}

#[tokio::test(start_paused = true)]
async fn test_interactive_free_rating_waits_for_each_answer() {
    let mut app = start_app(
        Script::builtin("triage-free-rating").unwrap(),
        PlaybackMode::Interactive,
    );

    for _ in 0..100 {
        run_until_idle(&mut app).await;
        if app.playback().is_finished() {
            break;
        }
        if app.playback().overlay_visible() {
            app.handle_action(Action::AcceptCall);
            continue;
        }

        // Parked at an unanswered widget
        assert!(app.playback().sequencer().awaiting_input());
        let before = app.playback().transcript().len();
        app.handle_action(Action::Confirm);
        app.handle_action(Action::SubmitChoices);
        assert_eq!(app.playback().transcript().len(), before + 1);
    }

    assert!(app.playback().is_finished());
    let entries = app.playback().transcript().entries();
    let replies = entries.iter().filter(|e| e.origin == Origin::Reply).count();
    assert_eq!(replies, 16);
    assert_eq!(entries.len(), 40 - 1 + 16);
    assert_eq!(
        app.playback().transcript().scripted_len(),
        app.playback().sequencer().cursor() - 1
    );
}

#[tokio::test(start_paused = true)]
async fn test_interactive_multi_choice_reply_lists_selection() {
    let script = Script::new(
        "multi",
        vec![
            Step::bot(1, "Где болит?"),
            Step::multi_choice(2, &["Голова", "Горло", "Спина"], true),
            Step::bot(3, "Понятно"),
        ],
    )
    .unwrap();
    let mut app = start_app(script, PlaybackMode::Interactive);
    run_until_idle(&mut app).await;

    // Nothing selected yet: submit is ignored
    app.handle_action(Action::SubmitChoices);
    assert_eq!(app.playback().transcript().len(), 2);

    app.handle_action(Action::Confirm);
    app.handle_action(Action::SelectNext);
    app.handle_action(Action::SelectNext);
    app.handle_action(Action::Confirm);
    app.handle_action(Action::SubmitChoices);

    run_until_idle(&mut app).await;
    assert_eq!(
        transcript_texts(&app),
        vec!["Где болит?", "Голова\nСпина", "Понятно"]
    );
    assert!(app.playback().is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_interactive_preset_rating_does_not_wait() {
    let script = Script::new(
        "preset",
        vec![
            Step::bot(1, "Спасибо за визит"),
            Step::stars(2, Some(4)),
            Step::bot(3, "До встречи"),
        ],
    )
    .unwrap();
    let mut app = start_app(script, PlaybackMode::Interactive);
    run_until_idle(&mut app).await;

    assert!(app.playback().is_finished());
    assert_eq!(app.playback().transcript().len(), 3);

    app.handle_action(Action::Rate(1));
    assert_eq!(app.playback().transcript().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_quit_action() {
    let mut app = start_app(script_with_call(), PlaybackMode::Scripted);
    assert!(!app.should_quit());
    app.handle_action(Action::Quit);
    assert!(app.should_quit());
}

#[tokio::test(start_paused = true)]
async fn test_scripted_without_call_needs_no_input() {
    let mut app = start_app(script_without_call(), PlaybackMode::Scripted);
    let applied = run_until_idle(&mut app).await;

    assert_eq!(applied, 10);
    assert!(app.playback().is_finished());
    assert!(!app.playback().overlay_visible());
    assert_eq!(app.playback().transcript().len(), 10);
}
