use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use typecraft::{
    app::{App, AppSettings, Control, Screen},
    battle::PassRule,
    clock::ManualClock,
    levels::Campaign,
    runtime::{AppEvent, FixedTicker, Runner, TestEventSource},
    ui::theme::ThemeMode,
    words::{WordCountRange, WordList},
};

fn settings(prompt: Option<&str>, practice_secs: u64) -> AppSettings {
    AppSettings {
        practice_secs,
        word_range: WordCountRange::default(),
        pass_rule: PassRule::default(),
        knight_idx: 0,
        theme: ThemeMode::Dark,
        custom_prompt: prompt.map(str::to_string),
        words: WordList::builtin().unwrap(),
    }
}

fn app_with(settings: AppSettings, clock: &ManualClock) -> App {
    App::with_rng(
        settings,
        Campaign::builtin().unwrap(),
        clock.shared(),
        StdRng::seed_from_u64(7),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.on_key(key(KeyCode::Char(c)));
    }
}

// Drives the app through the runtime runner without a TTY.
#[test]
fn headless_practice_flow_completes() {
    let clock = ManualClock::new();
    let mut app = app_with(settings(Some("hi"), 60), &clock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for code in [KeyCode::Char('p'), KeyCode::Char('h'), KeyCode::Char('i')] {
        tx.send(AppEvent::Key(key(code))).unwrap();
    }

    for _ in 0..100u32 {
        match runner.step() {
            AppEvent::Tick(elapsed) => app.on_tick(elapsed),
            AppEvent::Resize => {}
            AppEvent::Key(event) => {
                assert_eq!(app.on_key(event), Control::Continue);
            }
        }
        if let Screen::Practice(round) = &app.screen {
            if round.result().is_some() {
                break;
            }
        }
    }

    let Screen::Practice(round) = &app.screen else {
        panic!("expected practice screen");
    };
    let result = round.result().expect("practice should have finished");
    assert_eq!(result.accuracy, 100);
    assert!(result.typing_began);
}

#[test]
fn headless_practice_scores_from_clock() {
    let clock = ManualClock::new();
    let mut app = app_with(settings(Some("the cat"), 60), &clock);
    app.open_practice();

    app.on_key(key(KeyCode::Char('t')));
    clock.advance(Duration::from_secs(2));
    type_text(&mut app, "he cat");

    let Screen::Practice(round) = &app.screen else {
        panic!("expected practice screen");
    };
    let result = round.result().unwrap();
    assert_eq!(result.wpm, 60);
    assert_eq!(result.accuracy, 100);
}

#[test]
fn headless_timed_practice_finishes_by_countdown() {
    let clock = ManualClock::new();
    let mut app = app_with(settings(Some("hello world"), 1), &clock);
    app.open_practice();

    // No countdown before the first keystroke.
    app.on_tick(Duration::from_secs(5));
    let Screen::Practice(round) = &app.screen else {
        panic!("expected practice screen");
    };
    assert!(round.result().is_none());

    type_text(&mut app, "hel");
    clock.advance(Duration::from_secs(1));
    app.on_tick(Duration::from_millis(600));
    app.on_tick(Duration::from_millis(600));

    let Screen::Practice(round) = &app.screen else {
        panic!("expected practice screen");
    };
    let result = round.result().expect("countdown should stop the session");
    assert!(round.session().is_stopped());
    assert_eq!(result.accuracy, 100);
}

#[test]
fn headless_practice_restart_and_back_to_menu() {
    let clock = ManualClock::new();
    let mut app = app_with(settings(Some("ok"), 60), &clock);
    app.open_practice();
    type_text(&mut app, "ok");

    app.on_key(key(KeyCode::Char('r')));
    let Screen::Practice(round) = &app.screen else {
        panic!("expected practice screen");
    };
    assert!(round.result().is_none());
    assert_eq!(round.session().target_text(), "ok");
    assert_eq!(round.countdown().remaining_secs(), 60);

    assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Continue);
    assert!(matches!(app.screen, Screen::Menu));
    assert_eq!(app.on_key(key(KeyCode::Esc)), Control::Quit);
}
