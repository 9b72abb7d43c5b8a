//! # Reconnect policy for provider sessions.
//!
//! [`ReconnectPolicy`] bounds how many consecutive closes a session tolerates and
//! how long it waits between dials.
//!
//! ```text
//! close #1 ─► wait backoff.next(0) ─► dial
//! close #2 ─► wait backoff.next(1) ─► dial
//! ...
//! close #max_attempts ─► exhausted (no further dials)
//! ```
//!
//! A successful open resets the count, so the ceiling applies to *consecutive* failures.

use std::time::Duration;

use crate::policies::BackoffPolicy;

/// Bounded, unconditional reconnect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconnectPolicy {
    /// Consecutive closes after which the session gives up (`0` is treated as `1`).
    pub max_attempts: u32,
    /// Delay between attempts.
    pub backoff: BackoffPolicy,
}

impl Default for ReconnectPolicy {
    /// 1000 attempts, fixed 10 s apart.
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl ReconnectPolicy {
    /// Fixed-delay policy with the given ceiling.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: BackoffPolicy::fixed(delay),
        }
    }

    /// Effective ceiling (never zero).
    #[inline]
    pub fn ceiling(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// True once `attempts` consecutive closes have used up the budget.
    #[inline]
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        attempts >= self.ceiling()
    }

    /// Delay to wait after the `attempts`-th consecutive close (1-based).
    #[inline]
    pub fn delay_after(&self, attempts: u32) -> Duration {
        self.backoff.next(attempts.saturating_sub(1))
    }
}
