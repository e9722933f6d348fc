//! Test countdown.
//!
//! The countdown is a plain state machine: the shell owns the clock and
//! calls [`Countdown::tick`] once per second. Expiry is reported exactly once.

use crate::model::{format_clock, DurationMinutes};

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Time remains; the display should show this many seconds.
    Running { remaining: u64 },
    /// Time just ran out. Reported once; the caller must submit.
    Expired,
    /// The countdown already expired or was stopped. Nothing to do.
    Stopped,
}

/// A one-shot countdown in whole seconds.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u64,
    running: bool,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self {
            remaining: seconds,
            running: true,
        }
    }

    pub fn from_duration(duration: DurationMinutes) -> Self {
        Self::new(duration.as_seconds())
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Stopped;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            tracing::debug!("countdown expired");
            Tick::Expired
        } else {
            tracing::trace!("countdown at {}", self.display());
            Tick::Running {
                remaining: self.remaining,
            }
        }
    }

    /// Stop without expiring, e.g. on manual submission.
    pub fn stop(&mut self) {
        self.running = false;
    }
}
