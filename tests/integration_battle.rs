use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use typecraft::{
    app::{App, AppSettings, Screen},
    battle::{BattlePhase, PassRule},
    clock::ManualClock,
    levels::Campaign,
    ui::theme::ThemeMode,
    words::{WordCountRange, WordList},
};

fn battle_app(clock: &ManualClock, knight_idx: usize) -> App {
    let settings = AppSettings {
        practice_secs: 60,
        word_range: WordCountRange::default(),
        pass_rule: PassRule::default(),
        knight_idx,
        theme: ThemeMode::Dark,
        custom_prompt: None,
        words: WordList::builtin().unwrap(),
    };
    let mut app = App::with_rng(
        settings,
        Campaign::builtin().unwrap(),
        clock.shared(),
        StdRng::seed_from_u64(1),
    );
    app.open_battle();
    app
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn phase(app: &App) -> BattlePhase {
    match &app.screen {
        Screen::Battle(battle) => battle.phase(),
        _ => panic!("expected battle screen"),
    }
}

fn current_script(app: &App) -> String {
    match &app.screen {
        Screen::Battle(battle) => battle.current_level().unwrap().target_text(),
        _ => panic!("expected battle screen"),
    }
}

/// Types the current level in ten seconds of clock time
fn fight(app: &mut App, clock: &ManualClock, text: &str) {
    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        press(app, KeyCode::Char(first));
    }
    clock.advance(Duration::from_secs(10));
    for c in chars {
        press(app, KeyCode::Char(c));
    }
}

#[test]
fn full_campaign_reaches_victory() {
    let clock = ManualClock::new();
    let mut app = battle_app(&clock, 0);
    assert_eq!(phase(&app), BattlePhase::Story);

    press(&mut app, KeyCode::Enter);
    assert_eq!(phase(&app), BattlePhase::ChooseKnight);
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Enter);

    let level_count = Campaign::builtin().unwrap().level_count();
    for level in 1..=level_count {
        assert_eq!(phase(&app), BattlePhase::Fighting);
        let script = current_script(&app);
        fight(&mut app, &clock, &script);

        if level < level_count {
            assert_eq!(phase(&app), BattlePhase::LevelWon, "level {level}");
            press(&mut app, KeyCode::Enter);
        }
    }

    assert_eq!(phase(&app), BattlePhase::Victory);
    assert_eq!(app.knight_index(), 1);
}

#[test]
fn sloppy_typing_is_game_over_and_retry_restarts_level_one() {
    let clock = ManualClock::new();
    let mut app = battle_app(&clock, 0);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    let garbage = "#".repeat(current_script(&app).chars().count());
    fight(&mut app, &clock, &garbage);
    assert_eq!(phase(&app), BattlePhase::GameOver);

    press(&mut app, KeyCode::Enter);
    assert_eq!(phase(&app), BattlePhase::Fighting);
    let Screen::Battle(battle) = &app.screen else {
        panic!("expected battle screen");
    };
    assert_eq!(battle.level_number(), 1);
}

#[test]
fn running_out_of_time_is_game_over() {
    let clock = ManualClock::new();
    let mut app = battle_app(&clock, 2);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);

    let script = current_script(&app);
    for c in script.chars().take(3) {
        press(&mut app, KeyCode::Char(c));
    }
    app.on_tick(Duration::from_secs(69));
    assert_eq!(phase(&app), BattlePhase::Fighting);
    app.on_tick(Duration::from_secs(1));
    assert_eq!(phase(&app), BattlePhase::GameOver);

    // Typing after the loss changes nothing.
    press(&mut app, KeyCode::Char('x'));
    assert_eq!(phase(&app), BattlePhase::GameOver);
}

#[test]
fn leaving_mid_fight_keeps_chosen_knight() {
    let clock = ManualClock::new();
    let mut app = battle_app(&clock, 0);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('x'));

    press(&mut app, KeyCode::Esc);
    assert!(matches!(app.screen, Screen::Menu));
    assert_eq!(app.knight_index(), 2);

    app.on_tick(Duration::from_secs(600));
    assert!(matches!(app.screen, Screen::Menu));
}
