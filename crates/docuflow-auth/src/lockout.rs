//! Generic rate-limit/lockout state machine.
//!
//! A lockout is a pair (attempt-count, lock-until) plus a policy
//! (max-attempts, lock-duration). The same machine drives both the login
//! and the recovery-answer flows; each account carries two independent
//! instances of the state under distinct field pairs.
//!
//! The machine is pure: transitions take `now` as a parameter and return new
//! state, so every path is testable without a clock.

use chrono::{DateTime, Duration, Utc};

/// Attempt counter plus optional lock expiry.
///
/// A `locked_until` strictly in the future takes precedence over attempt
/// counting: [`LockoutPolicy::check`] fails fast with the remaining time and
/// nothing increments while the lock holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockoutState {
    pub attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
}

impl LockoutState {
    /// State with zero attempts and no lock.
    pub fn open() -> Self {
        Self::default()
    }
}

/// Result of checking a lockout state at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// The operation may proceed.
    Open,
    /// The lock window is still running.
    Locked { remaining_seconds: i64 },
}

/// Parameters for one lockout instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Failures that trigger a lock.
    pub max_attempts: u32,
    /// How long the lock holds once triggered.
    pub lock_duration: Duration,
}

impl LockoutPolicy {
    pub fn new(max_attempts: u32, lock_duration: Duration) -> Self {
        Self {
            max_attempts,
            lock_duration,
        }
    }

    /// Check whether the state is locked at `now`.
    ///
    /// Never mutates: a locked state stays exactly as it was, counters
    /// included.
    pub fn check(&self, state: &LockoutState, now: DateTime<Utc>) -> LockStatus {
        match state.locked_until {
            Some(until) if until > now => LockStatus::Locked {
                remaining_seconds: (until - now).num_seconds(),
            },
            _ => LockStatus::Open,
        }
    }

    /// Record a failed attempt, returning the new state.
    ///
    /// Increments the counter; when it reaches `max_attempts` the lock is set
    /// to `now + lock_duration` and the counter resets to zero. The lock
    /// replaces counting, it does not stack on top of it.
    pub fn record_failure(&self, state: &LockoutState, now: DateTime<Utc>) -> LockoutState {
        let attempts = state.attempts + 1;
        if attempts >= self.max_attempts {
            LockoutState {
                attempts: 0,
                locked_until: Some(now + self.lock_duration),
            }
        } else {
            LockoutState {
                attempts,
                locked_until: state.locked_until,
            }
        }
    }

    /// Record a success: counter to zero, lock cleared.
    pub fn record_success(&self, _state: &LockoutState) -> LockoutState {
        LockoutState::open()
    }
}
