use rand::Rng;
use std::time::Duration;

use crate::clock::SharedClock;
use crate::countdown::{Countdown, CountdownStatus};
use crate::key::Key;
use crate::session::{SessionEvent, SessionResult, TypingSession};
use crate::words::{build_target, WordCountRange, WordList};

pub const DEFAULT_PRACTICE_SECS: u64 = 60;

/// Where practice prompts come from
#[derive(Clone, Debug, PartialEq)]
pub enum PromptSource {
    Fixed(String),
    Words { list: WordList, range: WordCountRange },
}

impl PromptSource {
    pub fn next_prompt<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            PromptSource::Fixed(text) => text.clone(),
            PromptSource::Words { list, range } => build_target(list, *range, rng),
        }
    }
}

/// Free practice: one prompt against a fixed countdown that starts on
/// the first keystroke.
#[derive(Debug)]
pub struct PracticeRound {
    source: PromptSource,
    session: TypingSession,
    countdown: Countdown,
    clock: SharedClock,
}

impl PracticeRound {
    pub fn new<R: Rng + ?Sized>(
        source: PromptSource,
        seconds: u64,
        clock: SharedClock,
        rng: &mut R,
    ) -> Self {
        let session = TypingSession::new(&source.next_prompt(rng), clock.clone());
        Self {
            source,
            session,
            countdown: Countdown::new(seconds),
            clock,
        }
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.session.result()
    }

    pub fn on_key(&mut self, key: Key) -> Option<SessionResult> {
        let mut finished = None;
        for event in self.session.handle_key(key) {
            match event {
                SessionEvent::Started => self.countdown.start(),
                SessionEvent::Keystroke(_) => {}
                SessionEvent::Finished(result) => {
                    self.countdown.clear();
                    finished = Some(result);
                }
            }
        }
        finished
    }

    pub fn on_tick(&mut self, elapsed: Duration) -> Option<SessionResult> {
        match self.countdown.advance(elapsed) {
            CountdownStatus::Expired => {
                tracing::debug!("practice countdown expired");
                self.session.stop()
            }
            CountdownStatus::Idle | CountdownStatus::Running => None,
        }
    }

    /// Leaving the screen: no timer may outlive the round
    pub fn abandon(&mut self) {
        self.countdown.cancel();
    }

    /// Fresh prompt (or the same custom prompt) and a full timer
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.session = TypingSession::new(&self.source.next_prompt(rng), self.clock.clone());
        self.countdown.reset();
    }
}
