//! Fixture scripts and helpers for driving an [`App`] on a paused clock

use std::path::{Path, PathBuf};

use concierge::{App, Config, PlaybackMode, Script, Step};

/// Upper bound on timers applied by one drive call
const MAX_TIMERS: usize = 500;

/// Short conversation that includes an incoming call
pub fn script_with_call() -> Script {
    Script::new(
        "with-call",
        vec![
            Step::bot(1, "Здравствуйте"),
            Step::buttons(2, &["Да", "Нет"]),
            Step::user(3, "Да"),
            Step::bot(4, "Сейчас с вами свяжется администратор"),
            Step::phone_call(5),
            Step::bot(6, "Вы записаны на приём"),
        ],
    )
    .expect("valid fixture")
}

/// Short conversation with every widget kind and no call
pub fn script_without_call() -> Script {
    Script::new(
        "without-call",
        vec![
            Step::bot(1, "Как вы себя чувствуете?"),
            Step::buttons(2, &["Хорошо", "Плохо"]),
            Step::user(3, "Хорошо"),
            Step::bot(4, "Оцените сервис"),
            Step::stars(5, None),
            Step::user(6, "⭐⭐⭐⭐⭐"),
            Step::bot(7, "Что ещё беспокоит?"),
            Step::multi_choice(8, &["Голова", "Горло", "Спина"], true),
            Step::user(9, "Голова"),
            Step::bot(10, "Спасибо!"),
        ],
    )
    .expect("valid fixture")
}

pub const SCRIPT_WITHOUT_CALL_JSON: &str = r#"{
  "name": "file-script",
  "title": "Консьерж",
  "steps": [
    { "id": 1, "kind": "bot-text", "text": "Добрый день" },
    { "id": 2, "kind": "choice-buttons", "labels": ["Привет"] },
    { "id": 3, "kind": "user-text", "text": "Привет" }
  ]
}"#;

/// Write `json` to `name` inside `dir`
pub fn write_script(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).expect("write fixture script");
    path
}

/// Started app with default config and timing
pub fn start_app(script: Script, mode: PlaybackMode) -> App {
    let mut app = App::new(Config::default(), script, mode);
    app.start();
    app
}

/// Apply timers until playback stops on its own
pub async fn run_until_idle(app: &mut App) -> usize {
    let mut applied = 0;
    while applied < MAX_TIMERS && app.apply_next_timer().await {
        applied += 1;
    }
    applied
}

/// Apply exactly `n` timers
pub async fn apply_timers(app: &mut App, n: usize) {
    for i in 0..n {
        assert!(app.apply_next_timer().await, "no timer pending at step {}", i);
    }
}

/// Texts of all transcript entries, in order
pub fn transcript_texts(app: &App) -> Vec<String> {
    app.playback()
        .transcript()
        .entries()
        .iter()
        .filter_map(|e| e.step.kind.text().map(str::to_string))
        .collect()
}
