//! # SessionActor: one supervised provider connection.
//!
//! Drives a [`SessionMachine`] with real transport events:
//! - dials through a [`Connector`],
//! - feeds inbound messages into the session's [`RecordStore`](crate::RecordStore),
//! - redials per [`ReconnectPolicy`](crate::ReconnectPolicy),
//! - stops on exhaustion or cooperative cancellation via [`CancellationToken`].
//!
//! ## Event flow
//! ```text
//! SessionStarting → [dial] ─ ok ──► SessionOpened → [pump messages] → SessionClosed
//!                          └ err ─────────────────────────────────► SessionClosed
//!
//! After SessionClosed:
//!   ├─► Plan::Retry  → ReconnectScheduled → [sleep] → next dial
//!   └─► Plan::GiveUp → SessionExhausted (once) → exit
//!
//! Cancellation (any point):
//!   close live link → exit, no SessionClosed
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** within one actor.
//! - The view is updated **before** the matching event is published.
//! - `opened` / `closed` / `exhausted` go to the notification queue directly, then the bus.
//! - Malformed payloads are dropped (`RecordDropped`, debug log), never fatal.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::{
    core::machine::{Lifecycle, Plan, SessionMachine},
    core::view::SessionView,
    error::TransportError,
    events::{Bus, Event, EventKind},
    notifications::NotificationQueue,
    policies::ReconnectPolicy,
    records::Record,
    transport::{BoxLink, Connector},
};

/// Why an actor returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorExitReason {
    /// Torn down through its cancellation token.
    Cancelled,
    /// Retry budget spent.
    Exhausted,
}

enum Pump {
    Cancelled,
    Closed(Option<TransportError>),
}

/// Supervises one provider connection.
pub struct SessionActor {
    view: Arc<SessionView>,
    connector: Arc<dyn Connector>,
    bus: Bus,
    notifications: NotificationQueue,
    machine: SessionMachine,
}

impl SessionActor {
    pub fn new(
        bus: Bus,
        view: Arc<SessionView>,
        connector: Arc<dyn Connector>,
        notifications: NotificationQueue,
        policy: ReconnectPolicy,
    ) -> Self {
        Self {
            view,
            connector,
            bus,
            notifications,
            machine: SessionMachine::new(policy),
        }
    }

    /// Runs until exhaustion or cancellation.
    ///
    /// ### Cancellation semantics
    /// `token` is honoured while dialing, while waiting for messages and during the
    /// reconnect sleep. A live link is closed before returning and no `SessionClosed`
    /// is published for it.
    pub async fn run(mut self, token: CancellationToken) -> ActorExitReason {
        loop {
            if token.is_cancelled() {
                return self.teardown(None).await;
            }
            if !self.machine.begin_connect() {
                return ActorExitReason::Exhausted;
            }
            self.sync_status().await;
            self.publish(EventKind::SessionStarting, |ev| {
                ev.with_attempt(self.machine.attempts())
            });

            let dialed = select! {
                res = self.dial() => Some(res),
                _ = token.cancelled() => None,
            };
            let Some(dialed) = dialed else {
                return self.teardown(None).await;
            };

            let cause = match dialed {
                Ok(mut link) => {
                    self.machine.on_open();
                    self.sync_status().await;
                    self.notify(EventKind::SessionOpened, |ev| ev).await;

                    match self.pump(&mut link, &token).await {
                        Pump::Cancelled => return self.teardown(Some(link)).await,
                        Pump::Closed(cause) => cause,
                    }
                }
                Err(e) => Some(e),
            };

            if let Some(Lifecycle::Closed { attempts }) = self.machine.on_close() {
                self.sync_status().await;
                tracing::debug!(
                    provider = self.view.name(),
                    connector = self.connector.name(),
                    attempts,
                    cause = cause.as_ref().map(TransportError::as_label),
                    "session closed"
                );
                self.notify(EventKind::SessionClosed, |ev| {
                    let ev = ev.with_attempt(attempts);
                    match &cause {
                        Some(e) => ev.with_reason(e.to_string()),
                        None => ev,
                    }
                })
                .await;
            }

            match self.machine.plan() {
                Plan::Retry { delay, attempts } => {
                    self.publish(EventKind::ReconnectScheduled, |ev| {
                        ev.with_attempt(attempts).with_delay(delay)
                    });
                    let slept = select! {
                        _ = time::sleep(delay) => true,
                        _ = token.cancelled() => false,
                    };
                    if !slept {
                        return self.teardown(None).await;
                    }
                }
                Plan::GiveUp { notify } => {
                    self.sync_status().await;
                    if let Some(Lifecycle::Exhausted { attempts }) = notify {
                        self.notify(EventKind::SessionExhausted, |ev| ev.with_attempt(attempts))
                            .await;
                    }
                    return ActorExitReason::Exhausted;
                }
            }
        }
    }

    async fn dial(&self) -> Result<BoxLink, TransportError> {
        match &self.view.provider().endpoint {
            Some(url) => self.connector.connect(url).await,
            None => Err(TransportError::MissingEndpoint),
        }
    }

    async fn pump(&self, link: &mut BoxLink, token: &CancellationToken) -> Pump {
        loop {
            let msg = select! {
                msg = link.recv() => msg,
                _ = token.cancelled() => return Pump::Cancelled,
            };
            match msg {
                Some(Ok(payload)) => self.ingest(&payload).await,
                Some(Err(e)) => return Pump::Closed(Some(e)),
                None => return Pump::Closed(None),
            }
        }
    }

    async fn ingest(&self, payload: &str) {
        match Record::from_json(payload) {
            Ok(record) => {
                self.view.upsert(record).await;
            }
            Err(e) => {
                tracing::debug!(provider = self.view.name(), error = %e, "dropping malformed record");
                self.publish(EventKind::RecordDropped, |ev| ev.with_reason(e.to_string()));
            }
        }
    }

    async fn teardown(&mut self, link: Option<BoxLink>) -> ActorExitReason {
        if let Some(mut link) = link {
            link.close().await;
        }
        self.machine.on_teardown();
        self.sync_status().await;
        ActorExitReason::Cancelled
    }

    async fn sync_status(&self) {
        self.view
            .set_status(self.machine.state(), self.machine.attempts())
            .await;
    }

    fn event(&self, kind: EventKind, f: impl FnOnce(Event) -> Event) -> Event {
        f(Event::new(kind)
            .with_provider(self.view.name())
            .with_session(self.view.id()))
    }

    fn publish(&self, kind: EventKind, f: impl FnOnce(Event) -> Event) {
        self.bus.publish(self.event(kind, f));
    }

    /// Queues the user notification for a lifecycle event, then publishes it.
    async fn notify(&self, kind: EventKind, f: impl FnOnce(Event) -> Event) {
        let ev = self.event(kind, f);
        self.notifications.on_event(&ev).await;
        self.bus.publish(ev);
    }
}
