//! # Session state machine.
//!
//! Pure connection-lifecycle bookkeeping for one provider, with no I/O and no timers.
//! The actor feeds it discrete transport events and acts on what it returns.
//!
//! ```text
//!               begin_connect()          on_open()
//! Disconnected ───────────────► Connecting ───────► Connected
//!      ▲                             │                  │
//!      │           on_close()        │    on_close()    │
//!      └─────────────────────────────┴──────────────────┘
//!      │
//!      │ plan(): attempts >= ceiling
//!      ▼
//!  Exhausted (terminal; begin_connect() refuses)
//! ```
//!
//! ## Rules
//! - `on_open` resets the attempt counter and the give-up flag.
//! - `on_close` increments the counter; it is ignored once exhausted.
//! - `plan` reports exhaustion at most once per give-up (guarded by `give_up_signaled`).
//! - Each method returns at most one [`Lifecycle`] event.

use std::time::Duration;

use crate::policies::ReconnectPolicy;
use crate::status::{Severity, classify};

/// Connection state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnState {
    /// Idle between attempts (or torn down).
    Disconnected,
    /// Dial in progress.
    Connecting,
    /// Live connection.
    Connected,
    /// Retry budget spent; no further dials.
    Exhausted,
}

impl ConnState {
    /// Short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConnState::Disconnected => "disconnected",
            ConnState::Connecting => "connecting",
            ConnState::Connected => "connected",
            ConnState::Exhausted => "exhausted",
        }
    }
}

/// Outbound lifecycle event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Connection established.
    Opened,
    /// Connection lost; `attempts` is the counter after the increment.
    Closed { attempts: u32 },
    /// Retry budget exhausted after `attempts` consecutive closes.
    Exhausted { attempts: u32 },
}

/// What to do after a close.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Plan {
    /// Wait `delay`, then dial again.
    Retry { delay: Duration, attempts: u32 },
    /// Stop dialing. `notify` is set only the first time.
    GiveUp { notify: Option<Lifecycle> },
}

/// Per-session state: `{ state, attempts, give_up_signaled }`.
#[derive(Clone, Debug)]
pub struct SessionMachine {
    state: ConnState,
    attempts: u32,
    give_up_signaled: bool,
    policy: ReconnectPolicy,
}

impl SessionMachine {
    /// Fresh machine in `Disconnected` with zero attempts.
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            state: ConnState::Disconnected,
            attempts: 0,
            give_up_signaled: false,
            policy,
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    /// Consecutive closes since the last successful open.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn give_up_signaled(&self) -> bool {
        self.give_up_signaled
    }

    pub fn severity(&self) -> Severity {
        classify(self.attempts)
    }

    /// Enters `Connecting`. Returns `false` when exhausted.
    pub fn begin_connect(&mut self) -> bool {
        if self.state == ConnState::Exhausted {
            return false;
        }
        self.state = ConnState::Connecting;
        true
    }

    /// Connection established.
    pub fn on_open(&mut self) -> Lifecycle {
        self.state = ConnState::Connected;
        self.attempts = 0;
        self.give_up_signaled = false;
        Lifecycle::Opened
    }

    /// Connection closed, failed, or could not be established.
    pub fn on_close(&mut self) -> Option<Lifecycle> {
        if self.state == ConnState::Exhausted {
            return None;
        }
        self.attempts = self.attempts.saturating_add(1);
        self.state = ConnState::Disconnected;
        Some(Lifecycle::Closed {
            attempts: self.attempts,
        })
    }

    /// Decides between another attempt and giving up.
    pub fn plan(&mut self) -> Plan {
        if !self.policy.is_exhausted(self.attempts) && self.state != ConnState::Exhausted {
            return Plan::Retry {
                delay: self.policy.delay_after(self.attempts),
                attempts: self.attempts,
            };
        }

        self.state = ConnState::Exhausted;
        let notify = if self.give_up_signaled {
            None
        } else {
            self.give_up_signaled = true;
            Some(Lifecycle::Exhausted {
                attempts: self.attempts,
            })
        };
        Plan::GiveUp { notify }
    }

    /// Intentional teardown: no lifecycle event, counter untouched.
    pub fn on_teardown(&mut self) {
        if self.state != ConnState::Exhausted {
            self.state = ConnState::Disconnected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(ceiling: u32) -> SessionMachine {
        SessionMachine::new(ReconnectPolicy::fixed(ceiling, Duration::from_secs(1)))
    }

    #[test]
    fn open_resets_attempts() {
        let mut m = machine(10);
        for _ in 0..4 {
            assert!(m.begin_connect());
            m.on_close();
            m.plan();
        }
        assert_eq!(m.attempts(), 4);
        assert_eq!(m.severity(), Severity::Unhealthy);

        assert!(m.begin_connect());
        assert_eq!(m.on_open(), Lifecycle::Opened);
        assert_eq!(m.attempts(), 0);
        assert_eq!(m.state(), ConnState::Connected);
        assert_eq!(m.severity(), Severity::Healthy);
    }

    #[test]
    fn close_increments_and_retries() {
        let mut m = machine(3);
        m.begin_connect();
        m.on_open();
        assert_eq!(m.on_close(), Some(Lifecycle::Closed { attempts: 1 }));
        assert_eq!(m.severity(), Severity::Degraded);
        assert_eq!(
            m.plan(),
            Plan::Retry {
                delay: Duration::from_secs(1),
                attempts: 1
            }
        );
        assert_eq!(m.state(), ConnState::Disconnected);
    }

    #[test]
    fn exhaustion_is_signalled_once() {
        let mut m = machine(3);
        let mut exhausted = 0;
        for _ in 0..10 {
            m.begin_connect();
            m.on_close();
            if let Plan::GiveUp {
                notify: Some(Lifecycle::Exhausted { attempts }),
            } = m.plan()
            {
                assert_eq!(attempts, 3);
                exhausted += 1;
            }
        }
        assert_eq!(exhausted, 1);
        assert_eq!(m.state(), ConnState::Exhausted);
        assert!(m.give_up_signaled());
        assert_eq!(m.attempts(), 3);
    }

    #[test]
    fn exhausted_machine_refuses_to_dial_and_ignores_closes() {
        let mut m = machine(1);
        m.begin_connect();
        m.on_close();
        assert!(matches!(m.plan(), Plan::GiveUp { notify: Some(_) }));

        assert!(!m.begin_connect());
        assert_eq!(m.on_close(), None);
        assert_eq!(m.plan(), Plan::GiveUp { notify: None });
    }

    #[test]
    fn reopen_before_ceiling_keeps_budget() {
        let mut m = machine(2);
        m.begin_connect();
        m.on_close();
        assert!(matches!(m.plan(), Plan::Retry { .. }));
        m.begin_connect();
        m.on_open();
        m.on_close();
        assert!(matches!(m.plan(), Plan::Retry { attempts: 1, .. }));
    }

    #[test]
    fn teardown_emits_nothing() {
        let mut m = machine(3);
        m.begin_connect();
        m.on_open();
        m.on_teardown();
        assert_eq!(m.state(), ConnState::Disconnected);
        assert_eq!(m.attempts(), 0);
    }
}
