//! # Runtime events emitted by the dashboard and its sessions.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Session lifecycle**: connect, open, close, reconnect scheduling, exhaustion
//! - **Management**: intentional removal and manual resume of sessions
//! - **Runtime**: shutdown progress
//!
//! The [`Event`] struct carries metadata such as timestamps, provider name,
//! session id, attempt counters and delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tickerboard::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::ReconnectScheduled)
//!     .with_provider("Stocks")
//!     .with_attempt(2)
//!     .with_delay(Duration::from_secs(10));
//!
//! assert_eq!(ev.kind, EventKind::ReconnectScheduled);
//! assert_eq!(ev.provider.as_deref(), Some("Stocks"));
//! assert_eq!(ev.delay_ms, Some(10_000));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Shutdown events ===
    /// Shutdown requested (OS signal observed or explicit call).
    ShutdownRequested,

    /// All sessions stopped within the configured grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some sessions did not stop in time.
    GraceExceeded,

    // === Session lifecycle events ===
    /// Session is dialing its endpoint.
    ///
    /// Sets: `provider`, `session`, `attempt` (consecutive failures so far).
    SessionStarting,

    /// Connection established; the attempt counter was reset.
    ///
    /// Sets: `provider`, `session`.
    SessionOpened,

    /// Connection closed or could not be established.
    ///
    /// Sets: `provider`, `session`, `attempt` (counter after increment), `reason`.
    SessionClosed,

    /// Next connection attempt scheduled.
    ///
    /// Sets: `provider`, `session`, `attempt`, `delay_ms`.
    ReconnectScheduled,

    /// Retry budget exhausted; the session will not reconnect on its own.
    ///
    /// Published at most once per exhaustion.
    /// Sets: `provider`, `session`, `attempt` (total attempts).
    SessionExhausted,

    /// Inbound payload could not be decoded as a record and was dropped.
    ///
    /// Sets: `provider`, `session`, `reason`.
    RecordDropped,

    // === Management events ===
    /// Session was torn down intentionally.
    ///
    /// Sets: `provider`, `session`.
    SessionRemoved,

    /// Exhausted session was restarted with a fresh retry budget.
    ///
    /// Sets: `provider`, `session`.
    SessionResumed,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Provider name, if applicable.
    pub provider: Option<Arc<str>>,
    /// Session id (unique per dashboard), if applicable.
    pub session: Option<u64>,
    /// Attempt counter.
    pub attempt: Option<u32>,
    /// Delay before the next attempt in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Human-readable reason (transport errors, stuck sessions).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            provider: None,
            session: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    /// Attaches a provider name.
    #[inline]
    pub fn with_provider(mut self, provider: impl Into<Arc<str>>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Attaches a session id.
    #[inline]
    pub fn with_session(mut self, id: u64) -> Self {
        self.session = Some(id);
        self
    }

    /// Attaches an attempt count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a reconnect delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for the three events users are notified about.
    #[inline]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self.kind,
            EventKind::SessionOpened | EventKind::SessionClosed | EventKind::SessionExhausted
        )
    }
}
