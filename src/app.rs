use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use crate::battle::{Battle, BattlePhase, PassRule};
use crate::clock::SharedClock;
use crate::key::Key;
use crate::levels::Campaign;
use crate::practice::{PracticeRound, PromptSource};
use crate::ui::theme::ThemeMode;
use crate::words::{WordCountRange, WordList};

/// Everything the app needs to build rounds, resolved from config and CLI
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub practice_secs: u64,
    pub word_range: WordCountRange,
    pub pass_rule: PassRule,
    pub knight_idx: usize,
    pub theme: ThemeMode,
    pub custom_prompt: Option<String>,
    pub words: WordList,
}

#[derive(Debug)]
pub enum Screen {
    Menu,
    Practice(PracticeRound),
    Battle(Battle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Single owner of all application state
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub theme: ThemeMode,
    settings: AppSettings,
    campaign: Campaign,
    knight_idx: usize,
    clock: SharedClock,
    rng: StdRng,
}

impl App {
    pub fn new(settings: AppSettings, campaign: Campaign, clock: SharedClock) -> Self {
        Self::with_rng(settings, campaign, clock, StdRng::from_entropy())
    }

    pub fn with_rng(
        settings: AppSettings,
        campaign: Campaign,
        clock: SharedClock,
        rng: StdRng,
    ) -> Self {
        Self {
            screen: Screen::Menu,
            theme: settings.theme,
            knight_idx: settings.knight_idx,
            settings,
            campaign,
            clock,
            rng,
        }
    }

    /// Knight chosen most recently, for saving on exit
    pub fn knight_index(&self) -> usize {
        match &self.screen {
            Screen::Battle(battle) => battle.knight_index(),
            _ => self.knight_idx,
        }
    }

    pub fn open_practice(&mut self) {
        let source = match &self.settings.custom_prompt {
            Some(prompt) => PromptSource::Fixed(prompt.clone()),
            None => PromptSource::Words {
                list: self.settings.words.clone(),
                range: self.settings.word_range,
            },
        };
        let round = PracticeRound::new(
            source,
            self.settings.practice_secs,
            self.clock.clone(),
            &mut self.rng,
        );
        self.screen = Screen::Practice(round);
    }

    pub fn open_battle(&mut self) {
        self.screen = Screen::Battle(Battle::new(
            self.campaign.clone(),
            self.settings.pass_rule,
            self.knight_idx,
            self.clock.clone(),
        ));
    }

    pub fn back_to_menu(&mut self) {
        match &mut self.screen {
            Screen::Practice(round) => round.abandon(),
            Screen::Battle(battle) => {
                battle.abandon();
                self.knight_idx = battle.knight_index();
            }
            Screen::Menu => {}
        }
        self.screen = Screen::Menu;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        match &mut self.screen {
            Screen::Practice(round) => {
                round.on_tick(elapsed);
            }
            Screen::Battle(battle) => {
                battle.on_tick(elapsed);
            }
            Screen::Menu => {}
        }
    }

    pub fn on_key(&mut self, event: KeyEvent) -> Control {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if event.code == KeyCode::Esc {
            return match self.screen {
                Screen::Menu => Control::Quit,
                _ => {
                    self.back_to_menu();
                    Control::Continue
                }
            };
        }

        match &mut self.screen {
            Screen::Menu => match event.code {
                KeyCode::Char('p') => self.open_practice(),
                KeyCode::Char('b') => self.open_battle(),
                KeyCode::Char('t') => self.toggle_theme(),
                KeyCode::Char('q') => return Control::Quit,
                _ => {}
            },
            Screen::Practice(round) => {
                if round.result().is_some() {
                    if matches!(event.code, KeyCode::Char('r') | KeyCode::Enter) {
                        round.restart(&mut self.rng);
                    }
                } else {
                    round.on_key(Key::from(event));
                }
            }
            Screen::Battle(battle) => match battle.phase() {
                BattlePhase::Story => {
                    if event.code == KeyCode::Enter {
                        battle.continue_story();
                    }
                }
                BattlePhase::ChooseKnight => match event.code {
                    KeyCode::Left | KeyCode::Up => battle.previous_knight(),
                    KeyCode::Right | KeyCode::Down | KeyCode::Tab => battle.next_knight(),
                    KeyCode::Enter => battle.start_game(),
                    _ => {}
                },
                BattlePhase::Fighting => {
                    battle.on_key(Key::from(event));
                }
                BattlePhase::LevelWon => {
                    if event.code == KeyCode::Enter {
                        battle.next_level();
                    }
                }
                BattlePhase::GameOver | BattlePhase::Victory => {
                    if event.code == KeyCode::Enter {
                        battle.start_game();
                    }
                }
            },
        }

        Control::Continue
    }
}
