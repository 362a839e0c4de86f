//! Window lifecycle states and the main window's bounded load retry.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

/// Lifecycle of a shell window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Uncreated,
    Loading,
    Loaded,
    /// Retries exhausted; showing the fallback page.
    Error,
    Closed,
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uncreated => "uncreated",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Error => "error",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Why a page load did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The server could not be reached or answered with a transport error.
    Unreachable(String),
    /// The load was superseded or cancelled. Never retried.
    Aborted,
}

/// Failure counter for one process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    pub failures: u32,
    pub max_attempts: u32,
}

impl RetryState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            failures: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn exhausted(&self) -> bool {
        self.failures >= self.max_attempts
    }
}

/// What the host should do after a load failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Schedule attempt number `attempt` after `delay`.
    Retry { attempt: u32, delay: Duration },
    /// Retries are used up; show the fallback page.
    Exhausted,
    /// Nothing to do (cancelled load, or not currently loading).
    Ignored,
}

/// What the host should do when (re)opening the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    Attempt(u32),
    Fallback,
}

/// Tracks the main window's URL loads.
///
/// Each network failure counts once. Attempt `n` fails, and if `n` is below
/// the limit attempt `n + 1` runs after the backoff; the failure that
/// reaches the limit switches to the fallback page instead of retrying.
/// The counter never resets while the process lives.
#[derive(Debug, Clone)]
pub struct MainLoadMachine {
    state: WindowState,
    retry: RetryState,
    backoff: Duration,
}

impl MainLoadMachine {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            state: WindowState::Uncreated,
            retry: RetryState::new(max_attempts),
            backoff,
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn retry(&self) -> RetryState {
        self.retry
    }

    /// Called when the main window is created or recreated.
    pub fn begin(&mut self) -> LoadStep {
        if self.retry.exhausted() {
            self.state = WindowState::Error;
            LoadStep::Fallback
        } else {
            self.state = WindowState::Loading;
            LoadStep::Attempt(self.retry.failures + 1)
        }
    }

    /// Whether a scheduled retry should still issue its load.
    pub fn retry_due(&self) -> bool {
        self.state == WindowState::Loading && !self.retry.exhausted()
    }

    /// Record a completed load. Returns false when the completion belongs to
    /// something other than a pending URL load (e.g. the fallback page).
    pub fn on_loaded(&mut self) -> bool {
        if self.state != WindowState::Loading {
            return false;
        }
        self.state = WindowState::Loaded;
        info!(failures = self.retry.failures, "main window loaded");
        true
    }

    pub fn on_failure(&mut self, failure: &LoadFailure) -> RetryDecision {
        if self.state != WindowState::Loading {
            return RetryDecision::Ignored;
        }

        let reason = match failure {
            LoadFailure::Aborted => return RetryDecision::Ignored,
            LoadFailure::Unreachable(reason) => reason,
        };

        self.retry.failures += 1;
        if self.retry.exhausted() {
            self.state = WindowState::Error;
            warn!(
                failures = self.retry.failures,
                reason = %reason,
                "main window load failed; giving up"
            );
            return RetryDecision::Exhausted;
        }

        let attempt = self.retry.failures + 1;
        warn!(
            attempt,
            max = self.retry.max_attempts,
            reason = %reason,
            "main window load failed; retrying"
        );
        RetryDecision::Retry {
            attempt,
            delay: self.backoff,
        }
    }

    pub fn on_closed(&mut self) {
        self.state = WindowState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable() -> LoadFailure {
        LoadFailure::Unreachable("connection refused".into())
    }

    #[test]
    fn starts_uncreated() {
        let m = MainLoadMachine::new(3, Duration::from_secs(2));
        assert_eq!(m.state(), WindowState::Uncreated);
    }

    #[test]
    fn success_on_first_attempt() {
        let mut m = MainLoadMachine::new(3, Duration::from_secs(2));
        assert_eq!(m.begin(), LoadStep::Attempt(1));
        assert!(m.on_loaded());
        assert_eq!(m.state(), WindowState::Loaded);
        assert!(!m.on_loaded());
    }

    #[test]
    fn never_exceeds_max_attempts() {
        let mut m = MainLoadMachine::new(3, Duration::from_millis(2000));
        m.begin();

        assert_eq!(
            m.on_failure(&unreachable()),
            RetryDecision::Retry {
                attempt: 2,
                delay: Duration::from_millis(2000)
            }
        );
        assert_eq!(
            m.on_failure(&unreachable()),
            RetryDecision::Retry {
                attempt: 3,
                delay: Duration::from_millis(2000)
            }
        );
        assert_eq!(m.on_failure(&unreachable()), RetryDecision::Exhausted);
        assert_eq!(m.state(), WindowState::Error);
        assert!(!m.retry_due());

        // Late failures after giving up change nothing.
        assert_eq!(m.on_failure(&unreachable()), RetryDecision::Ignored);
        assert_eq!(m.retry().failures, 3);
    }

    #[test]
    fn aborted_loads_are_not_counted() {
        let mut m = MainLoadMachine::new(2, Duration::ZERO);
        m.begin();
        assert_eq!(m.on_failure(&LoadFailure::Aborted), RetryDecision::Ignored);
        assert_eq!(m.retry().failures, 0);
        assert_eq!(m.state(), WindowState::Loading);
    }

    #[test]
    fn fallback_completion_is_not_a_load() {
        let mut m = MainLoadMachine::new(1, Duration::ZERO);
        m.begin();
        assert_eq!(m.on_failure(&unreachable()), RetryDecision::Exhausted);
        assert!(!m.on_loaded());
        assert_eq!(m.state(), WindowState::Error);
    }

    #[test]
    fn reopening_after_exhaustion_goes_straight_to_fallback() {
        let mut m = MainLoadMachine::new(1, Duration::ZERO);
        m.begin();
        m.on_failure(&unreachable());
        m.on_closed();
        assert_eq!(m.state(), WindowState::Closed);
        assert_eq!(m.begin(), LoadStep::Fallback);
    }

    #[test]
    fn reopening_keeps_failure_count() {
        let mut m = MainLoadMachine::new(5, Duration::ZERO);
        m.begin();
        m.on_failure(&unreachable());
        m.on_closed();
        assert!(!m.retry_due());
        assert_eq!(m.begin(), LoadStep::Attempt(2));
    }

    #[test]
    fn zero_max_is_treated_as_one() {
        assert_eq!(RetryState::new(0).max_attempts, 1);
    }
}
