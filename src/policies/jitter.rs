//! # Jitter policy for reconnect delays.
//!
//! [`JitterPolicy`] randomizes reconnect delays so that many dashboards pointed at the
//! same provider do not redial in lockstep after an outage.
//!
//! - [`JitterPolicy::None`]: exact delay (default)
//! - [`JitterPolicy::Full`]: random delay in `[0, delay]`
//! - [`JitterPolicy::Equal`]: `delay/2 + random[0, delay/2]`

use rand::Rng;
use std::time::Duration;

/// Randomization applied on top of a computed backoff delay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JitterPolicy {
    /// Use the backoff delay as is.
    #[default]
    None,
    /// Uniform in `[0, delay]`.
    Full,
    /// Uniform in `[delay/2, delay]`.
    Equal,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    pub fn apply(&self, delay: Duration) -> Duration {
        let ms = delay.as_millis().min(u128::from(u64::MAX)) as u64;
        if ms == 0 {
            return delay;
        }
        let mut rng = rand::rng();
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => Duration::from_millis(rng.random_range(0..=ms)),
            JitterPolicy::Equal => {
                let half = ms / 2;
                Duration::from_millis(half + rng.random_range(0..=ms - half))
            }
        }
    }
}
