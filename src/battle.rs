use std::time::Duration;

use crate::clock::SharedClock;
use crate::countdown::{Countdown, CountdownStatus};
use crate::key::Key;
use crate::levels::{Campaign, Knight, Level};
use crate::session::{SessionEvent, SessionResult, TypingSession};

pub const DEFAULT_PASS_WPM: i64 = 30;
pub const DEFAULT_PASS_ACCURACY: u8 = 75;

/// Minimum result needed to beat a villain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassRule {
    pub min_wpm: i64,
    pub min_accuracy: u8,
}

impl Default for PassRule {
    fn default() -> Self {
        Self {
            min_wpm: DEFAULT_PASS_WPM,
            min_accuracy: DEFAULT_PASS_ACCURACY,
        }
    }
}

impl PassRule {
    pub fn passes(&self, result: &SessionResult) -> bool {
        result.wpm >= self.min_wpm && result.accuracy >= self.min_accuracy
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    LevelWon,
    GameOver,
    Victory,
}

/// Verdict for a finished level; `level` is 1-based.
pub fn judge(
    result: &SessionResult,
    level: usize,
    total_levels: usize,
    expired: bool,
    rule: PassRule,
) -> LevelOutcome {
    if expired || !rule.passes(result) {
        LevelOutcome::GameOver
    } else if level < total_levels {
        LevelOutcome::LevelWon
    } else {
        LevelOutcome::Victory
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Story,
    ChooseKnight,
    Fighting,
    LevelWon,
    GameOver,
    Victory,
}

/// Five-level typing battle
#[derive(Debug)]
pub struct Battle {
    campaign: Campaign,
    rule: PassRule,
    phase: BattlePhase,
    knight_idx: usize,
    level: usize,
    session: Option<TypingSession>,
    countdown: Countdown,
    last_result: Option<SessionResult>,
    clock: SharedClock,
}

impl Battle {
    pub fn new(campaign: Campaign, rule: PassRule, knight_idx: usize, clock: SharedClock) -> Self {
        let knight_idx = knight_idx.min(campaign.knights.len().saturating_sub(1));
        Self {
            campaign,
            rule,
            phase: BattlePhase::Story,
            knight_idx,
            level: 0,
            session: None,
            countdown: Countdown::new(0),
            last_result: None,
            clock,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn knight(&self) -> &Knight {
        &self.campaign.knights[self.knight_idx]
    }

    pub fn knight_index(&self) -> usize {
        self.knight_idx
    }

    /// 1-based, 0 before the first level
    pub fn level_number(&self) -> usize {
        self.level
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.level
            .checked_sub(1)
            .and_then(|idx| self.campaign.levels.get(idx))
    }

    pub fn session(&self) -> Option<&TypingSession> {
        self.session.as_ref()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn last_result(&self) -> Option<SessionResult> {
        self.last_result
    }

    pub fn rule(&self) -> PassRule {
        self.rule
    }

    pub fn continue_story(&mut self) {
        if self.phase == BattlePhase::Story {
            self.phase = BattlePhase::ChooseKnight;
        }
    }

    pub fn next_knight(&mut self) {
        if self.phase == BattlePhase::ChooseKnight {
            self.knight_idx = (self.knight_idx + 1) % self.campaign.knights.len();
        }
    }

    pub fn previous_knight(&mut self) {
        if self.phase == BattlePhase::ChooseKnight {
            let count = self.campaign.knights.len();
            self.knight_idx = (self.knight_idx + count - 1) % count;
        }
    }

    /// Level 1 with the selected knight; also "try again" / "play again"
    pub fn start_game(&mut self) {
        if matches!(
            self.phase,
            BattlePhase::ChooseKnight | BattlePhase::GameOver | BattlePhase::Victory
        ) {
            tracing::info!(knight = %self.knight().name, "battle started");
            self.enter_level(1);
        }
    }

    pub fn next_level(&mut self) {
        if self.phase == BattlePhase::LevelWon && self.level < self.campaign.level_count() {
            self.enter_level(self.level + 1);
        }
    }

    fn enter_level(&mut self, level: usize) {
        let entry = &self.campaign.levels[level - 1];
        self.level = level;
        self.session = Some(TypingSession::new(&entry.target_text(), self.clock.clone()));
        self.countdown = Countdown::new(entry.time_secs);
        self.last_result = None;
        self.phase = BattlePhase::Fighting;
    }

    pub fn on_key(&mut self, key: Key) -> Option<LevelOutcome> {
        if self.phase != BattlePhase::Fighting {
            return None;
        }
        let session = self.session.as_mut()?;

        let mut outcome = None;
        for event in session.handle_key(key) {
            match event {
                SessionEvent::Started => self.countdown.start(),
                SessionEvent::Keystroke(_) => {}
                SessionEvent::Finished(result) => {
                    self.countdown.cancel();
                    outcome = Some(self.conclude(result, false));
                }
            }
        }
        outcome
    }

    pub fn on_tick(&mut self, elapsed: Duration) -> Option<LevelOutcome> {
        if self.phase != BattlePhase::Fighting {
            return None;
        }
        match self.countdown.advance(elapsed) {
            CountdownStatus::Expired => {
                let result = self.session.as_mut()?.stop()?;
                Some(self.conclude(result, true))
            }
            CountdownStatus::Idle | CountdownStatus::Running => None,
        }
    }

    /// Leaving the battle screen
    pub fn abandon(&mut self) {
        self.countdown.cancel();
    }

    fn conclude(&mut self, result: SessionResult, expired: bool) -> LevelOutcome {
        let outcome = judge(
            &result,
            self.level,
            self.campaign.level_count(),
            expired,
            self.rule,
        );
        tracing::info!(
            level = self.level,
            wpm = result.wpm,
            accuracy = result.accuracy,
            expired,
            ?outcome,
            "level concluded"
        );

        self.last_result = Some(result);
        self.phase = match outcome {
            LevelOutcome::LevelWon => BattlePhase::LevelWon,
            LevelOutcome::GameOver => BattlePhase::GameOver,
            LevelOutcome::Victory => BattlePhase::Victory,
        };
        outcome
    }
}
