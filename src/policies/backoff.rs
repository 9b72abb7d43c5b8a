//! # Backoff policy for reconnect attempts.
//!
//! [`BackoffPolicy`] computes how long a session waits before redialing.
//! The delay before retry `n` (0-indexed) is `first × factor^n`, clamped to `max`,
//! then jitter is applied. The base is derived from the retry index alone, so jitter
//! never feeds back into later delays.
//!
//! The default is a **fixed** 10 s delay (`factor = 1.0`, no jitter).
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use tickerboard::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_secs(1),
//!     max: Duration::from_secs(8),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//!
//! assert_eq!(backoff.next(0), Duration::from_secs(1));
//! assert_eq!(backoff.next(2), Duration::from_secs(4));
//! assert_eq!(backoff.next(10), Duration::from_secs(8));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Reconnect delay policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub first: Duration,
    /// Upper bound for any delay.
    pub max: Duration,
    /// Multiplicative growth factor; `1.0` keeps the delay fixed.
    pub factor: f64,
    /// Randomization applied to the clamped delay.
    pub jitter: JitterPolicy,
}

impl Default for BackoffPolicy {
    /// Fixed 10 s between attempts.
    fn default() -> Self {
        Self::fixed(Duration::from_secs(10))
    }
}

impl BackoffPolicy {
    /// A constant delay with no growth and no jitter.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            first: delay,
            max: delay,
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }

    /// Computes the delay before retry number `retry` (0-indexed).
    pub fn next(&self, retry: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exp = retry.min(i32::MAX as u32) as i32;
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);

        let base = if !secs.is_finite() || secs < 0.0 || secs > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        };
        self.jitter.apply(base)
    }
}
