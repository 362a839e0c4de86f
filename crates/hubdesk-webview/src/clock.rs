//! Time source and deferred work for the window shell.
//!
//! The shell never sleeps. It schedules timers against a [`Clock`] and the
//! event loop calls back in once the earliest deadline passes, which keeps
//! retry and delay logic testable with [`ManualClock`].

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pending timers ordered by deadline. Equal deadlines fire in insertion order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<(Instant, u64, T)>,
    seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deadline: Instant, item: T) {
        self.entries.push((deadline, self.seq, item));
        self.seq += 1;
        self.entries.sort_by_key(|(at, seq, _)| (*at, *seq));
    }

    /// Remove and return every timer whose deadline is at or before `now`.
    pub fn due(&mut self, now: Instant) -> Vec<T> {
        let split = self.entries.partition_point(|(at, _, _)| *at <= now);
        self.entries.drain(..split).map(|(_, _, item)| item).collect()
    }

    /// Drop timers matching `pred`.
    pub fn cancel(&mut self, mut pred: impl FnMut(&T) -> bool) {
        self.entries.retain(|(_, _, item)| !pred(item));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|(at, _, _)| *at)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
