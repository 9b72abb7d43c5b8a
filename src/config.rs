//! # Global runtime configuration.
//!
//! Provides [`Config`], the centralized settings for a [`Dashboard`](crate::Dashboard).
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by the bus
//! - `reconnect.max_attempts = 0` → treated as 1 (see [`ReconnectPolicy::ceiling`])
//! - `notification_ttl = 0` → notifications never expire on their own

use std::time::Duration;

use crate::policies::ReconnectPolicy;

/// Global configuration for the dashboard runtime.
///
/// ## Field semantics
/// - `grace`: maximum wait for sessions to stop on shutdown
/// - `bus_capacity`: event bus ring buffer size
/// - `reconnect`: retry ceiling and delay, shared by every session
/// - `notification_ttl`: how long a notification lives unless dismissed
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum time to wait for sessions to stop during shutdown.
    ///
    /// Sessions that are still running afterwards are reported in
    /// `RuntimeError::GraceExceeded` and aborted.
    pub grace: Duration,

    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Slow receivers that lag behind more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,

    /// Reconnect policy applied to every provider session.
    pub reconnect: ReconnectPolicy,

    /// Lifetime of a notification before it expires on its own.
    pub notification_ttl: Duration,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `grace = 5s`
    /// - `bus_capacity = 1024`
    /// - `reconnect = ReconnectPolicy::default()` (1000 attempts, fixed 10s)
    /// - `notification_ttl = 2s`
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
            reconnect: ReconnectPolicy::default(),
            notification_ttl: Duration::from_millis(2000),
        }
    }
}
