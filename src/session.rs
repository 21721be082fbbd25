use rand::Rng;
use std::time::Instant;

use crate::clock::SharedClock;
use crate::key::Key;
use crate::words::{build_target, WordCountRange, WordList};

/// Used when typing never started or no time has passed: one second.
const FALLBACK_MINUTES: f64 = 1.0 / 60.0;

#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Final (wpm, accuracy) of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionResult {
    pub wpm: i64,
    pub accuracy: u8,
    /// false when the session was stopped before any character key
    pub typing_began: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// First character key of the session
    Started,
    Keystroke(Outcome),
    Finished(SessionResult),
}

/// Display state of one target character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    Untyped,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Cursor(usize),
    EndOfInput,
}

/// One attempt at typing a fixed target text.
///
/// Finalizes at most once: either the last target character is typed or
/// the owner calls [`TypingSession::stop`], whichever comes first.
pub struct TypingSession {
    target: Vec<char>,
    typed: Vec<char>,
    started_at: Option<Instant>,
    total_keystrokes: u64,
    wrong_keystrokes: u64,
    stopped: bool,
    result: Option<SessionResult>,
    clock: SharedClock,
}

impl std::fmt::Debug for TypingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingSession")
            .field("target", &self.target_text())
            .field("typed", &self.typed_text())
            .field("started_at", &self.started_at)
            .field("total_keystrokes", &self.total_keystrokes)
            .field("wrong_keystrokes", &self.wrong_keystrokes)
            .field("stopped", &self.stopped)
            .field("result", &self.result)
            .finish()
    }
}

impl TypingSession {
    pub fn new(target: &str, clock: SharedClock) -> Self {
        Self {
            target: target.chars().collect(),
            typed: Vec::new(),
            started_at: None,
            total_keystrokes: 0,
            wrong_keystrokes: 0,
            stopped: false,
            result: None,
            clock,
        }
    }

    /// Session over a randomly assembled prompt
    pub fn from_word_list<R: Rng + ?Sized>(
        list: &WordList,
        range: WordCountRange,
        rng: &mut R,
        clock: SharedClock,
    ) -> Self {
        Self::new(&build_target(list, range, rng), clock)
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn target_text(&self) -> String {
        self.target.iter().collect()
    }

    pub fn typed(&self) -> &[char] {
        &self.typed
    }

    pub fn typed_text(&self) -> String {
        self.typed.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.typed.len()
    }

    pub fn total_keystrokes(&self) -> u64 {
        self.total_keystrokes
    }

    pub fn wrong_keystrokes(&self) -> u64 {
        self.wrong_keystrokes
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.result
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.stopped || self.is_finished() {
            return events;
        }

        if key.is_char() && self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
            tracing::debug!(target_len = self.target.len(), "typing session started");
            events.push(SessionEvent::Started);
        }

        match key {
            Key::Backspace => {
                self.typed.pop();
            }
            Key::Char(c) if self.cursor() < self.target.len() => {
                let expected = self.target[self.cursor()];
                let outcome = if c == expected {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                };

                self.total_keystrokes += 1;
                if outcome == Outcome::Incorrect {
                    self.wrong_keystrokes += 1;
                }
                events.push(SessionEvent::Keystroke(outcome));

                self.typed.push(c);
                if self.cursor() == self.target.len() {
                    if let Some(result) = self.finalize() {
                        events.push(SessionEvent::Finished(result));
                    }
                }
            }
            Key::Char(_) | Key::Other => {}
        }

        events
    }

    /// External stop (countdown expiry, navigation away).
    ///
    /// Returns the result only when this call finalized the session.
    pub fn stop(&mut self) -> Option<SessionResult> {
        self.stopped = true;
        self.finalize()
    }

    fn finalize(&mut self) -> Option<SessionResult> {
        if self.result.is_some() {
            return None;
        }

        let minutes = match self.started_at {
            Some(start) => {
                let ms = self.clock.now().saturating_duration_since(start).as_millis();
                if ms == 0 {
                    FALLBACK_MINUTES
                } else {
                    ms as f64 / 60_000.0
                }
            }
            None => FALLBACK_MINUTES,
        };

        let result = SessionResult {
            wpm: words_per_minute(count_words(&self.typed), minutes),
            accuracy: accuracy(self.total_keystrokes, self.wrong_keystrokes),
            typing_began: self.started_at.is_some(),
        };

        tracing::info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            keystrokes = self.total_keystrokes,
            wrong = self.wrong_keystrokes,
            "typing session finished"
        );

        self.result = Some(result);
        Some(result)
    }

    pub fn char_states(&self) -> impl Iterator<Item = CharState> + '_ {
        self.target.iter().enumerate().map(|(idx, expected)| {
            match self.typed.get(idx) {
                None => CharState::Untyped,
                Some(c) if c == expected => CharState::Correct,
                Some(_) => CharState::Incorrect,
            }
        })
    }

    pub fn cursor_marker(&self) -> Option<Marker> {
        if self.stopped {
            None
        } else if self.cursor() < self.target.len() {
            Some(Marker::Cursor(self.cursor()))
        } else {
            Some(Marker::EndOfInput)
        }
    }
}

/// Non-empty whitespace-delimited tokens
pub fn count_words(typed: &[char]) -> usize {
    typed
        .split(|c| c.is_whitespace())
        .filter(|w| !w.is_empty())
        .count()
}

pub fn words_per_minute(words: usize, minutes: f64) -> i64 {
    (words as f64 / minutes).round() as i64
}

pub fn accuracy(total: u64, wrong: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let correct = total.saturating_sub(wrong);
    ((correct as f64 / total as f64) * 100.0).round() as u8
}
