use std::time::Duration;

const SECOND: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Not started, cancelled, or already expired
    Idle,
    Running,
    /// Reported once, on the advance that reached zero
    Expired,
}

/// Per-second countdown owned by a mode controller.
///
/// Time is fed in by the owner through [`Countdown::advance`]; partial
/// seconds accumulate until a whole second has passed.
#[derive(Clone, Debug, PartialEq)]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
    carry: Duration,
    running: bool,
}

impl Countdown {
    pub fn new(total_secs: u64) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            carry: Duration::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    pub fn cancel(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    /// Back to the full duration, not running
    pub fn reset(&mut self) {
        self.cancel();
        self.remaining_secs = self.total_secs;
    }

    /// Stop and show zero, used when a session ends before time runs out
    pub fn clear(&mut self) {
        self.cancel();
        self.remaining_secs = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn advance(&mut self, elapsed: Duration) -> CountdownStatus {
        if !self.running {
            return CountdownStatus::Idle;
        }

        self.carry += elapsed;
        while self.carry >= SECOND && self.remaining_secs > 0 {
            self.carry -= SECOND;
            self.remaining_secs -= 1;
        }

        if self.remaining_secs == 0 {
            self.cancel();
            CountdownStatus::Expired
        } else {
            CountdownStatus::Running
        }
    }
}
