//! Idle delay for the polling loop.
//!
//! `Sleeper` abstracts the actual wait so the loop can be driven in tests
//! without real delays.

use std::time::Duration;

/// Base delay between empty polls.
pub const DEFAULT_IDLE_DELAY: Duration = Duration::from_millis(10);

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSleeper;

impl Sleeper for RealSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records requested delays and returns immediately.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockSleeper {
    calls: std::sync::Mutex<Vec<Duration>>,
}

#[cfg(test)]
impl MockSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
impl Sleeper for MockSleeper {
    fn sleep(&self, duration: Duration) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(duration);
        }
    }
}

/// Doubles the idle delay on each consecutive empty poll, up to `max`.
/// With `max == base` this is a plain fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleBackoff {
    base: Duration,
    max: Duration,
    current: Duration,
}

impl IdleBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        let max = max.max(base);
        Self {
            base,
            max,
            current: base,
        }
    }

    pub fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    /// Delay to use now; advances the backoff for the next empty poll.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        delay
    }

    /// Called after a frame was delivered.
    pub fn reset(&mut self) {
        self.current = self.base;
    }
}

impl Default for IdleBackoff {
    fn default() -> Self {
        Self::fixed(DEFAULT_IDLE_DELAY)
    }
}
